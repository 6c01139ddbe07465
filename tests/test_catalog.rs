//! Catalog construction, validation and loading from JSON.

mod common;

use std::collections::HashMap;
use std::io::Write;

use snyllo_booking::{BookingError, Catalog, CouponTable, Offerings, PricingTable, PurchaseType};
use tempfile::NamedTempFile;

fn trial_only(prices: &[(&str, u64)], offered: &[&str]) -> (PricingTable, Offerings) {
    let pricing = PricingTable {
        trial: prices.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        permanent: HashMap::new(),
    };
    let offerings = Offerings {
        trial: offered.iter().map(|s| s.to_string()).collect(),
        permanent: Vec::new(),
    };
    (pricing, offerings)
}

// ---------------------------------------------------------------------------
// Built-in catalog
// ---------------------------------------------------------------------------

#[test]
fn builtin_matches_deployed_form() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.offerings(PurchaseType::Trial), ["face", "body", "legs"]);
    assert_eq!(
        catalog.offerings(PurchaseType::Permanent),
        ["face", "body", "legs", "arms", "back"]
    );
    assert_eq!(catalog.price(PurchaseType::Trial, "arms"), Some(2500));
    assert_eq!(catalog.price(PurchaseType::Permanent, "body"), Some(10000));
    assert_eq!(catalog.coupons().get("SNYLLO40"), Some(0.60));
    assert_eq!(catalog.coupons().multiplier("NOPE"), 1.0);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn offered_part_without_price_is_rejected() {
    let (pricing, offerings) = trial_only(&[("chin", 2000)], &["chin", "underarms"]);
    let err = Catalog::new(pricing, offerings, CouponTable::new()).unwrap_err();
    assert!(matches!(err, BookingError::InvalidArgument(ref m) if m.contains("underarms")));
}

#[test]
fn zero_price_is_rejected() {
    let (pricing, offerings) = trial_only(&[("chin", 0)], &["chin"]);
    assert!(Catalog::new(pricing, offerings, CouponTable::new()).is_err());
}

#[test]
fn prices_summing_past_exact_float_range_are_rejected() {
    let huge = u64::MAX / 2 + 1;
    let (pricing, offerings) =
        trial_only(&[("chin", huge), ("upperlip", huge)], &["chin", "upperlip"]);
    let err = Catalog::new(pricing, offerings, CouponTable::new()).unwrap_err();
    assert!(matches!(err, BookingError::InvalidArgument(_)));

    let limit = snyllo_booking::config::MAX_CATALOG_TOTAL;
    let (pricing, offerings) =
        trial_only(&[("chin", limit / 2), ("upperlip", limit / 2 + 1)], &["chin"]);
    let err = Catalog::new(pricing, offerings, CouponTable::new()).unwrap_err();
    assert!(matches!(err, BookingError::InvalidArgument(_)));

    let (pricing, offerings) =
        trial_only(&[("chin", limit / 2), ("upperlip", limit / 2)], &["chin", "upperlip"]);
    assert!(Catalog::new(pricing, offerings, CouponTable::new()).is_ok());
}

#[test]
fn duplicate_offering_is_rejected() {
    let (pricing, offerings) = trial_only(&[("chin", 2000)], &["chin", "chin"]);
    assert!(Catalog::new(pricing, offerings, CouponTable::new()).is_err());
}

#[test]
fn coupon_multiplier_must_be_a_discount() {
    for bad in [0.0, -0.5, 1.5, f64::NAN] {
        let (pricing, offerings) = trial_only(&[("chin", 2000)], &["chin"]);
        let mut coupons = CouponTable::new();
        coupons.insert("BAD", bad);
        assert!(
            Catalog::new(pricing, offerings, coupons).is_err(),
            "multiplier {} accepted",
            bad
        );
    }

    let (pricing, offerings) = trial_only(&[("chin", 2000)], &["chin"]);
    let mut coupons = CouponTable::new();
    coupons.insert("FULLPRICE", 1.0);
    assert!(Catalog::new(pricing, offerings, coupons).is_ok());
}

// ---------------------------------------------------------------------------
// JSON loading
// ---------------------------------------------------------------------------

#[test]
fn from_json_str_equals_programmatic_catalog() {
    let catalog = Catalog::from_json_str(common::SAMPLE_CATALOG_JSON).unwrap();
    assert_eq!(catalog, common::sample_catalog());
}

#[test]
fn coupons_are_optional_in_json() {
    let json = r#"{
        "pricing": {"trial": {"chin": 2000}, "permanent": {}},
        "offerings": {"trial": ["chin"], "permanent": []}
    }"#;
    let catalog = Catalog::from_json_str(json).unwrap();
    assert!(catalog.coupons().is_empty());
}

#[test]
fn invalid_json_catalog_is_rejected_while_parsing() {
    let json = r#"{
        "pricing": {"trial": {}, "permanent": {}},
        "offerings": {"trial": ["chin"], "permanent": []}
    }"#;
    let err = Catalog::from_json_str(json).unwrap_err();
    assert!(matches!(err, BookingError::Json(_)));
}

#[test]
fn from_file_reads_catalog() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", common::SAMPLE_CATALOG_JSON).unwrap();
    file.flush().unwrap();

    let catalog = Catalog::from_file(file.path()).unwrap();
    assert_eq!(catalog.price(PurchaseType::Permanent, "full"), Some(45000));
}

#[test]
fn from_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, BookingError::Io(_)));
}

#[test]
fn catalog_serializes_back_to_loadable_json() {
    let catalog = common::sample_catalog();
    let json = serde_json::to_string(&catalog).unwrap();
    assert_eq!(Catalog::from_json_str(&json).unwrap(), catalog);
}
