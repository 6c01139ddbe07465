//! The booking form controller.
//!
//! Owns one form session: the field values, the catalog they are priced
//! against, the outcome of the last submission and the pending auto-reset
//! that follows a successful one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::{BookingError, Result};
use crate::models::{
    display_label, BodyPartOption, BookingRequest, Catalog, Field, Gender, PurchaseType,
    SubmitStatus,
};
use crate::pricing::{self, Quote};
use crate::submitter::{BookingSubmitter, HttpSubmitter};
use crate::validation;

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FormState {
    request: BookingRequest,
    status: SubmitStatus,
    in_flight: bool,
    /// Bumped whenever a pending reset is scheduled or cancelled. A reset
    /// task only fires if the epoch it captured is still current.
    reset_epoch: u64,
    reset_task: Option<JoinHandle<()>>,
}

impl FormState {
    fn cancel_reset(&mut self) {
        self.reset_epoch = self.reset_epoch.wrapping_add(1);
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }
    }

    fn clear(&mut self) {
        self.request = BookingRequest::default();
        self.status = SubmitStatus::None;
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the in-flight flag when a submission finishes or is dropped mid-way.
struct InFlight<'a>(&'a Mutex<FormState>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.0).in_flight = false;
    }
}

// ---------------------------------------------------------------------------
// BookingForm
// ---------------------------------------------------------------------------

/// One booking form session.
///
/// Created via [`BookingForm::builder()`] (HTTP endpoint) or
/// [`BookingForm::new`] with any [`BookingSubmitter`]. All operations take
/// `&self`; state sits behind a mutex that is never held across an `.await`.
///
/// Dropping the form cancels any pending auto-reset.
pub struct BookingForm<S = HttpSubmitter> {
    state: Arc<Mutex<FormState>>,
    catalog: Catalog,
    submitter: S,
    reset_delay: Duration,
}

impl BookingForm {
    /// Create a new builder for a form that posts to the booking endpoint.
    pub fn builder() -> crate::BookingFormBuilder {
        crate::BookingFormBuilder::default()
    }
}

impl<S: BookingSubmitter> BookingForm<S> {
    pub fn new(catalog: Catalog, submitter: S, reset_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            catalog,
            submitter,
            reset_delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock(&self.state)
    }

    // -- Accessors ----------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    /// Copy of the current field values.
    pub fn snapshot(&self) -> BookingRequest {
        self.lock().request.clone()
    }

    pub fn status(&self) -> SubmitStatus {
        self.lock().status
    }

    /// Text to show under the form for the current status, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        self.status().message()
    }

    /// Whether a submission is currently awaiting the endpoint.
    pub fn is_submitting(&self) -> bool {
        self.lock().in_flight
    }

    // -- Field updates --------------------------------------------------------

    pub fn set_name(&self, name: impl Into<String>) {
        self.lock().request.name = name.into();
    }

    pub fn set_phone_number(&self, phone_number: impl Into<String>) {
        self.lock().request.phone_number = phone_number.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.lock().request.email = email.into();
    }

    /// Offerings do not depend on gender, so selections are kept.
    pub fn set_gender(&self, gender: Gender) {
        self.lock().request.gender = gender;
    }

    /// Switch package type, dropping selections the new type does not offer.
    pub fn set_purchase_type(&self, purchase_type: PurchaseType) {
        let mut state = self.lock();
        state.request.purchase_type = purchase_type;

        let catalog = &self.catalog;
        let before = state.request.selected_body_parts.len();
        state
            .request
            .selected_body_parts
            .retain(|part| catalog.is_offered(purchase_type, part));
        let pruned = before - state.request.selected_body_parts.len();
        if pruned > 0 {
            tracing::debug!(%purchase_type, pruned, "dropped selections not offered");
        }
    }

    pub fn set_selected_date(&self, date: impl Into<String>) {
        self.lock().request.selected_date = date.into();
    }

    pub fn set_coupon(&self, coupon: impl Into<String>) {
        self.lock().request.coupon = coupon.into();
    }

    /// Set a scalar field by its wire name (`"phoneNumber"`, `"gender"`, ...).
    ///
    /// Content is not validated here; only `gender` and `purchaseType` must
    /// parse. Body parts are changed with [`toggle_body_part`](Self::toggle_body_part).
    pub fn update_field(&self, field: &str, value: &str) -> Result<()> {
        match field.parse::<Field>()? {
            Field::Name => self.set_name(value),
            Field::PhoneNumber => self.set_phone_number(value),
            Field::Email => self.set_email(value),
            Field::Gender => self.set_gender(value.parse()?),
            Field::PurchaseType => self.set_purchase_type(value.parse()?),
            Field::SelectedDate => self.set_selected_date(value),
            Field::Coupon => self.set_coupon(value),
            Field::SelectedBodyParts => {
                return Err(BookingError::InvalidArgument(
                    "selectedBodyParts is not a scalar field; use toggle_body_part".into(),
                ))
            }
        }
        Ok(())
    }

    /// Select `part` if unselected, unselect it otherwise.
    ///
    /// Returns whether the part is selected afterwards. Selecting a part the
    /// current purchase type does not offer is an error; unselecting always
    /// succeeds.
    pub fn toggle_body_part(&self, part: &str) -> Result<bool> {
        let mut state = self.lock();
        let purchase_type = state.request.purchase_type;
        if !state.request.is_selected(part) && !self.catalog.is_offered(purchase_type, part) {
            return Err(BookingError::InvalidArgument(format!(
                "Body part '{}' is not offered for {}",
                part, purchase_type
            )));
        }
        Ok(state.request.toggle(part))
    }

    // -- Derived views --------------------------------------------------------

    pub fn available_body_parts(&self) -> Vec<String> {
        let purchase_type = self.lock().request.purchase_type;
        self.catalog.offerings(purchase_type).to_vec()
    }

    /// The checkbox list for the current purchase type.
    pub fn body_part_options(&self) -> Vec<BodyPartOption> {
        let state = self.lock();
        let purchase_type = state.request.purchase_type;
        self.catalog
            .offerings(purchase_type)
            .iter()
            .map(|part| BodyPartOption {
                id: part.clone(),
                label: display_label(part),
                price: self.catalog.price(purchase_type, part).unwrap_or(0),
                selected: state.request.is_selected(part),
            })
            .collect()
    }

    pub fn quote(&self) -> Quote {
        let state = self.lock();
        pricing::quote(
            &self.catalog,
            state.request.purchase_type,
            &state.request.selected_body_parts,
            &state.request.coupon,
        )
    }

    pub fn total_price(&self) -> u64 {
        self.quote().total
    }

    // -- Submission -----------------------------------------------------------

    /// Validate the form and send it to the submitter.
    ///
    /// * Validation failure: [`BookingError::Validation`], status
    ///   [`SubmitStatus::Invalid`], submitter not called.
    /// * Another submission still pending: [`BookingError::SubmissionInFlight`].
    /// * Submitter failure: its error, status [`SubmitStatus::Error`], fields kept.
    /// * Success: status [`SubmitStatus::Success`]; the form resets after the
    ///   reset delay unless cancelled first.
    pub async fn submit(&self) -> Result<()> {
        let request = {
            let mut state = self.lock();
            if state.in_flight {
                return Err(BookingError::SubmissionInFlight);
            }
            state.cancel_reset();
            if let Err(e) = validation::validate(&state.request) {
                tracing::debug!(error = %e, "booking rejected locally");
                state.status = SubmitStatus::Invalid;
                return Err(e.into());
            }
            state.status = SubmitStatus::None;
            state.in_flight = true;
            state.request.clone()
        };
        let _in_flight = InFlight(&self.state);

        let outcome = self.submitter.submit_booking(&request).await;

        let mut state = self.lock();
        match outcome {
            Ok(()) => {
                tracing::info!(
                    purchase_type = %request.purchase_type,
                    parts = request.selected_body_parts.len(),
                    "booking submitted"
                );
                state.status = SubmitStatus::Success;
                self.schedule_reset(&mut state);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "booking submission failed");
                state.status = SubmitStatus::Error;
                Err(e)
            }
        }
    }

    fn schedule_reset(&self, state: &mut FormState) {
        state.cancel_reset();

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("no Tokio runtime, form will not reset automatically");
                return;
            }
        };

        let epoch = state.reset_epoch;
        let shared: Weak<Mutex<FormState>> = Arc::downgrade(&self.state);
        let delay = self.reset_delay;

        state.reset_task = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let mut state = lock(&shared);
            if state.reset_epoch == epoch {
                state.clear();
                state.reset_task = None;
                tracing::debug!("form reset after successful submission");
            }
        }));
    }

    /// Reset every field and the status now, cancelling any pending auto-reset.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.cancel_reset();
        state.clear();
    }

    /// Tear the form down. Equivalent to dropping it.
    pub fn close(self) {
        drop(self);
    }
}

impl<S> Drop for BookingForm<S> {
    fn drop(&mut self) {
        lock(&self.state).cancel_reset();
    }
}
