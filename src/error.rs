use std::fmt;

use crate::models::Field;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Submission failed: {message}")]
    Submission {
        /// HTTP status returned by the endpoint, `None` for transport errors.
        status: Option<u16>,
        message: String,
    },

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;

/// One rejected field together with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub reason: String,
}

/// Local validation failure. Carries every failing field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// An empty error, to be filled with [`push`](Self::push).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `field` failed for `reason`.
    pub fn push(&mut self, field: Field, reason: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            reason: reason.into(),
        });
    }

    /// `true` if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every recorded failure, in check order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Fields that failed, in check order, without duplicates.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        for e in &self.errors {
            if !fields.contains(&e.field) {
                fields.push(e.field);
            }
        }
        fields
    }

    /// Whether `field` failed at least once.
    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{} {}", e.field, e.reason))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}
