//! Booking form controller for Snyllo laser-hair-removal appointments.
//!
//! Holds the state of one booking form session, derives the bookable body
//! parts from the selected package, prices the selection (with coupon
//! discounts), validates the form and submits it to the remote booking
//! endpoint. Rendering is left to the caller; everything a UI needs to draw
//! the form is exposed as plain data.
//!
//! # Quick start
//!
//! ```no_run
//! use snyllo_booking::{BookingForm, PurchaseType};
//!
//! # async fn example() -> snyllo_booking::Result<()> {
//! let form = BookingForm::builder().build()?;
//!
//! form.set_name("Asha");
//! form.set_phone_number("9876543210");
//! form.set_email("asha@example.com");
//! form.set_selected_date("2026-11-02");
//! form.set_purchase_type(PurchaseType::Trial);
//! form.toggle_body_part("face")?;
//! form.set_coupon("SNYLLO25");
//!
//! println!("Total Amount: ₹{}", form.total_price());
//! form.submit().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod pricing;
pub mod submitter;
pub mod validation;

pub use controller::BookingForm;
pub use error::{BookingError, FieldError, Result, ValidationError};
pub use models::{
    BodyPartOption, BookingRequest, Catalog, CouponTable, Field, Gender, Offerings,
    PricingTable, PurchaseType, SubmitStatus,
};
pub use pricing::Quote;
pub use submitter::{BookingSubmitter, HttpSubmitter};

use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// BookingFormBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`BookingForm`].
///
/// Use [`BookingForm::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](BookingFormBuilder::build) for a form that
/// posts to the booking endpoint, or
/// [`build_with()`](BookingFormBuilder::build_with) to plug in another
/// [`BookingSubmitter`].
pub struct BookingFormBuilder {
    endpoint: String,
    timeout: Duration,
    reset_delay: Duration,
    catalog: Option<Catalog>,
    catalog_file: Option<PathBuf>,
}

impl Default for BookingFormBuilder {
    fn default() -> Self {
        Self {
            endpoint: config::DEFAULT_ENDPOINT.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            reset_delay: config::DEFAULT_RESET_DELAY,
            catalog: None,
            catalog_file: None,
        }
    }
}

impl BookingFormBuilder {
    /// Set the URL bookings are POSTed to.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long a successful submission is shown before the form resets.
    ///
    /// Defaults to 3 seconds.
    pub fn reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Use the given catalog. Takes precedence over
    /// [`catalog_file`](Self::catalog_file).
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Load the catalog from a JSON file at build time.
    ///
    /// If neither this nor [`catalog`](Self::catalog) is set, the catalog at
    /// [`config::default_catalog_path`] is used when present, otherwise the
    /// built-in one.
    pub fn catalog_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalog_file = Some(path.as_ref().to_path_buf());
        self
    }

    fn resolve_catalog(&mut self) -> Result<Catalog> {
        if let Some(catalog) = self.catalog.take() {
            return Ok(catalog);
        }
        match &self.catalog_file {
            Some(path) => Catalog::from_file(path),
            None => Catalog::load_default(),
        }
    }

    /// Build a form that POSTs to the configured endpoint.
    pub fn build(mut self) -> Result<BookingForm<HttpSubmitter>> {
        let submitter = HttpSubmitter::new(self.endpoint.clone(), self.timeout)?;
        let catalog = self.resolve_catalog()?;
        Ok(BookingForm::new(catalog, submitter, self.reset_delay))
    }

    /// Build a form that hands bookings to `submitter`.
    ///
    /// The endpoint and timeout settings are ignored.
    pub fn build_with<S: BookingSubmitter>(mut self, submitter: S) -> Result<BookingForm<S>> {
        let catalog = self.resolve_catalog()?;
        Ok(BookingForm::new(catalog, submitter, self.reset_delay))
    }
}
