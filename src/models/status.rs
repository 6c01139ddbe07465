use serde::{Deserialize, Serialize};

/// Outcome of the most recent submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    None,
    /// Rejected locally; the endpoint was never contacted.
    Invalid,
    Success,
    /// The endpoint refused the booking or could not be reached.
    Error,
}

impl SubmitStatus {
    /// Message shown under the form, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SubmitStatus::None => None,
            SubmitStatus::Invalid => Some("Please fill in all the required fields"),
            SubmitStatus::Success => {
                Some("Thank you for contacting us, we will be in touch shortly!")
            }
            SubmitStatus::Error => Some("Error submitting form. Please try again."),
        }
    }
}
