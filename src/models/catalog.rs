//! Deployment-specific configuration of the form: what can be booked, what it
//! costs and which coupons are honoured.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{BookingError, Result};
use crate::models::PurchaseType;

// ---------------------------------------------------------------------------
// PricingTable
// ---------------------------------------------------------------------------

/// Prices in the smallest currency unit, keyed by body-part identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PricingTable {
    pub trial: HashMap<String, u64>,
    pub permanent: HashMap<String, u64>,
}

impl PricingTable {
    pub fn for_type(&self, purchase_type: PurchaseType) -> &HashMap<String, u64> {
        match purchase_type {
            PurchaseType::Trial => &self.trial,
            PurchaseType::Permanent => &self.permanent,
        }
    }

    pub fn price(&self, purchase_type: PurchaseType, part: &str) -> Option<u64> {
        self.for_type(purchase_type).get(part).copied()
    }
}

// ---------------------------------------------------------------------------
// Offerings
// ---------------------------------------------------------------------------

/// Ordered list of bookable body parts per purchase type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Offerings {
    pub trial: Vec<String>,
    pub permanent: Vec<String>,
}

impl Offerings {
    pub fn for_type(&self, purchase_type: PurchaseType) -> &[String] {
        match purchase_type {
            PurchaseType::Trial => &self.trial,
            PurchaseType::Permanent => &self.permanent,
        }
    }
}

// ---------------------------------------------------------------------------
// CouponTable
// ---------------------------------------------------------------------------

/// Coupon code -> price multiplier. Codes are matched exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CouponTable(HashMap<String, f64>);

impl CouponTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, multiplier: f64) {
        self.0.insert(code.into(), multiplier);
    }

    /// Multiplier for `code`, or `None` if the code is unknown.
    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    /// Multiplier for `code`; unknown codes apply no discount.
    pub fn multiplier(&self, code: &str) -> f64 {
        self.get(code).unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CouponTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Pricing table, offerings and coupons injected into a booking form.
///
/// Always validated on construction, so a `Catalog` in hand guarantees that
/// every offered part has a positive price and every coupon multiplier lies
/// in `(0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pricing: PricingTable,
    offerings: Offerings,
    coupons: CouponTable,
}

#[derive(Deserialize)]
struct RawCatalog {
    pricing: PricingTable,
    offerings: Offerings,
    #[serde(default)]
    coupons: CouponTable,
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawCatalog::deserialize(deserializer)?;
        Catalog::new(raw.pricing, raw.offerings, raw.coupons).map_err(serde::de::Error::custom)
    }
}

impl Catalog {
    pub fn new(pricing: PricingTable, offerings: Offerings, coupons: CouponTable) -> Result<Self> {
        let catalog = Self {
            pricing,
            offerings,
            coupons,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(pricing: PricingTable, offerings: Offerings) -> Self {
        Self {
            pricing,
            offerings,
            coupons: CouponTable::new(),
        }
    }

    /// The catalog of the deployed booking form.
    pub fn builtin() -> Self {
        let prices = |list: Vec<(&str, u64)>| {
            list.into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<HashMap<_, _>>()
        };
        let parts = |list: Vec<&str>| list.into_iter().map(String::from).collect::<Vec<_>>();

        Self {
            pricing: PricingTable {
                trial: prices(config::default_trial_prices()),
                permanent: prices(config::default_permanent_prices()),
            },
            offerings: Offerings {
                trial: parts(config::default_trial_offerings()),
                permanent: parts(config::default_permanent_offerings()),
            },
            coupons: config::default_coupons().into_iter().collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded catalog");
        Ok(catalog)
    }

    /// Load the catalog from the default config location, falling back to
    /// [`Catalog::builtin`] when no file is present.
    pub fn load_default() -> Result<Self> {
        let path = config::default_catalog_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::builtin())
        }
    }

    fn validate(&self) -> Result<()> {
        for purchase_type in PurchaseType::ALL {
            let prices = self.pricing.for_type(purchase_type);
            let offered = self.offerings.for_type(purchase_type);

            for (i, part) in offered.iter().enumerate() {
                if offered[..i].contains(part) {
                    return Err(BookingError::InvalidArgument(format!(
                        "Body part '{}' offered twice for {}",
                        part, purchase_type
                    )));
                }
                if !prices.contains_key(part) {
                    return Err(BookingError::InvalidArgument(format!(
                        "Body part '{}' is offered for {} but has no price",
                        part, purchase_type
                    )));
                }
            }

            let mut sum: u64 = 0;
            for (part, price) in prices {
                if *price == 0 {
                    return Err(BookingError::InvalidArgument(format!(
                        "Price of '{}' for {} must be positive",
                        part, purchase_type
                    )));
                }
                sum = match sum.checked_add(*price) {
                    Some(s) if s <= config::MAX_CATALOG_TOTAL => s,
                    _ => {
                        return Err(BookingError::InvalidArgument(format!(
                            "Prices for {} add up to more than {}",
                            purchase_type,
                            config::MAX_CATALOG_TOTAL
                        )))
                    }
                };
                if !offered.contains(part) {
                    tracing::warn!(%part, %purchase_type, "priced body part is not offered");
                }
            }
        }

        for (code, multiplier) in self.coupons.iter() {
            if !multiplier.is_finite() || *multiplier <= 0.0 || *multiplier > 1.0 {
                return Err(BookingError::InvalidArgument(format!(
                    "Coupon '{}' has multiplier {} outside (0, 1]",
                    code, multiplier
                )));
            }
        }

        Ok(())
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn coupons(&self) -> &CouponTable {
        &self.coupons
    }

    pub fn offerings(&self, purchase_type: PurchaseType) -> &[String] {
        self.offerings.for_type(purchase_type)
    }

    pub fn is_offered(&self, purchase_type: PurchaseType, part: &str) -> bool {
        self.offerings(purchase_type).iter().any(|p| p == part)
    }

    pub fn price(&self, purchase_type: PurchaseType, part: &str) -> Option<u64> {
        self.pricing.price(purchase_type, part)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// BodyPartOption — one checkbox of the rendered form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyPartOption {
    pub id: String,
    pub label: String,
    pub price: u64,
    pub selected: bool,
}

/// `"face"` -> `"Face"`.
pub fn display_label(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
