//! Price computation for a selection of body parts.
//!
//! Everything here is a pure function of the catalog, the purchase type, the
//! selected parts and the coupon code. Amounts are in the smallest currency
//! unit; discounted totals are rounded to the nearest unit (halves away from
//! zero).

use serde::Serialize;

use crate::models::{Catalog, PurchaseType};

/// Breakdown of a computed price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Sum of the selected parts' prices before any discount.
    pub subtotal: u64,
    pub multiplier: f64,
    /// `subtotal - total`.
    pub discount: u64,
    pub total: u64,
    /// Whether the coupon code matched a known coupon.
    pub coupon_applied: bool,
}

/// Compute the price breakdown for `parts` under `purchase_type` with `coupon`.
///
/// Parts without a price contribute nothing; a warning is logged for each.
pub fn quote<S: AsRef<str>>(
    catalog: &Catalog,
    purchase_type: PurchaseType,
    parts: &[S],
    coupon: &str,
) -> Quote {
    let subtotal = subtotal(catalog, purchase_type, parts);
    let known = catalog.coupons().get(coupon);
    let multiplier = known.unwrap_or(1.0);
    let total = apply_multiplier(subtotal, multiplier);

    Quote {
        subtotal,
        multiplier,
        discount: subtotal.saturating_sub(total),
        total,
        coupon_applied: known.is_some(),
    }
}

/// Total price only. See [`quote`].
pub fn total_price<S: AsRef<str>>(
    catalog: &Catalog,
    purchase_type: PurchaseType,
    parts: &[S],
    coupon: &str,
) -> u64 {
    quote(catalog, purchase_type, parts, coupon).total
}

pub fn subtotal<S: AsRef<str>>(catalog: &Catalog, purchase_type: PurchaseType, parts: &[S]) -> u64 {
    parts
        .iter()
        .map(|part| {
            let part = part.as_ref();
            catalog.price(purchase_type, part).unwrap_or_else(|| {
                tracing::warn!(%part, %purchase_type, "no price for body part, counting as 0");
                0
            })
        })
        .fold(0u64, u64::saturating_add)
}

/// Scale `amount` by `multiplier` and round to the nearest whole unit.
pub fn apply_multiplier(amount: u64, multiplier: f64) -> u64 {
    let scaled = (amount as f64 * multiplier).round();
    if scaled <= 0.0 {
        0
    } else {
        scaled as u64
    }
}
