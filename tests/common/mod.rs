//! Shared fixtures for the booking form integration tests.
//!
//! Provides a second-generation catalog (chin/upperlip/underarms trials), an
//! in-memory [`StubSubmitter`] that records every call, and helpers for
//! filling in a form that passes validation.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use snyllo_booking::{
    BookingError, BookingForm, BookingRequest, BookingSubmitter, Catalog, CouponTable, Offerings,
    PricingTable, Result,
};
use tokio::sync::Notify;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn prices(list: &[(&str, u64)]) -> HashMap<String, u64> {
    list.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn parts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Catalog of the later form revision.
pub fn sample_catalog() -> Catalog {
    Catalog::new(
        PricingTable {
            trial: prices(&[("chin", 2000), ("upperlip", 1500), ("underarms", 2000)]),
            permanent: prices(&[
                ("full", 45000),
                ("face", 12000),
                ("legs", 15000),
                ("arms", 10000),
                ("chest", 9000),
                ("back", 11000),
            ]),
        },
        Offerings {
            trial: parts(&["chin", "upperlip", "underarms"]),
            permanent: parts(&["full", "face", "legs", "arms", "chest", "back"]),
        },
        [("SNYLLO25", 0.75), ("SNYLLO40", 0.60)]
            .into_iter()
            .collect::<CouponTable>(),
    )
    .unwrap()
}

pub const SAMPLE_CATALOG_JSON: &str = r#"{
    "pricing": {
        "trial": {"chin": 2000, "upperlip": 1500, "underarms": 2000},
        "permanent": {"full": 45000, "face": 12000, "legs": 15000, "arms": 10000, "chest": 9000, "back": 11000}
    },
    "offerings": {
        "trial": ["chin", "upperlip", "underarms"],
        "permanent": ["full", "face", "legs", "arms", "chest", "back"]
    },
    "coupons": {"SNYLLO25": 0.75, "SNYLLO40": 0.60}
}"#;

// ---------------------------------------------------------------------------
// StubSubmitter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum StubOutcome {
    Accept,
    Reject(u16),
    Unreachable,
}

/// Records every booking it is handed and answers with a fixed outcome.
///
/// A gated stub waits for the `Notify` before answering, which keeps a
/// submission in flight for as long as the test needs.
pub struct StubSubmitter {
    outcome: Mutex<StubOutcome>,
    calls: AtomicUsize,
    received: Mutex<Vec<BookingRequest>>,
    gate: Option<Arc<Notify>>,
}

impl StubSubmitter {
    pub fn new(outcome: StubOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(outcome),
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    pub fn gated(outcome: StubOutcome, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(outcome),
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
            gate: Some(gate),
        })
    }

    pub fn set_outcome(&self, outcome: StubOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<BookingRequest> {
        self.received.lock().unwrap().clone()
    }
}

impl BookingSubmitter for StubSubmitter {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let outcome = *self.outcome.lock().unwrap();
        match outcome {
            StubOutcome::Accept => Ok(()),
            StubOutcome::Reject(code) => Err(BookingError::Submission {
                status: Some(code),
                message: format!("booking endpoint responded with {}", code),
            }),
            StubOutcome::Unreachable => Err(BookingError::Submission {
                status: None,
                message: "connection refused".into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

pub const RESET_DELAY: Duration = Duration::from_secs(3);

pub fn stub_form(submitter: Arc<StubSubmitter>) -> BookingForm<Arc<StubSubmitter>> {
    init_tracing();
    BookingForm::new(sample_catalog(), submitter, RESET_DELAY)
}

/// Fill every field so that the form passes validation.
pub fn fill_valid<S: BookingSubmitter>(form: &BookingForm<S>) {
    form.set_name("Asha Verma");
    form.set_phone_number("9876543210");
    form.set_email("asha@example.com");
    form.set_selected_date("2026-11-02");
    form.update_field("purchaseType", "trial").unwrap();
    form.toggle_body_part("chin").unwrap();
    form.toggle_body_part("underarms").unwrap();
    form.set_coupon("SNYLLO25");
}
