use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://snyllo-payment.onrender.com/user-details-bookform";

/// How long a successful submission stays on screen before the form resets.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(3);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound for the sum of one purchase type's prices. Totals are scaled
/// through `f64`, which holds integers exactly only up to 2^53.
pub const MAX_CATALOG_TOTAL: u64 = 1 << 53;

pub const CATALOG_FILE: &str = "catalog.json";

pub fn default_config_dir() -> PathBuf {
    if let Some(config) = dirs::config_dir() {
        config.join("snyllo-booking")
    } else {
        PathBuf::from(".snyllo-booking")
    }
}

/// Where a deployment drops its catalog override.
pub fn default_catalog_path() -> PathBuf {
    default_config_dir().join(CATALOG_FILE)
}

pub fn default_trial_prices() -> Vec<(&'static str, u64)> {
    vec![
        ("face", 1000),
        ("body", 2000),
        ("legs", 1500),
        ("arms", 2500),
        ("back", 3000),
    ]
}

pub fn default_permanent_prices() -> Vec<(&'static str, u64)> {
    vec![
        ("face", 5000),
        ("body", 10000),
        ("legs", 5000),
        ("arms", 7500),
        ("back", 10000),
    ]
}

pub fn default_trial_offerings() -> Vec<&'static str> {
    vec!["face", "body", "legs"]
}

pub fn default_permanent_offerings() -> Vec<&'static str> {
    vec!["face", "body", "legs", "arms", "back"]
}

pub fn default_coupons() -> Vec<(&'static str, f64)> {
    vec![("SNYLLO25", 0.75), ("SNYLLO40", 0.60)]
}
