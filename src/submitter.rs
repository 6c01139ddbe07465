//! The remote booking endpoint, behind a narrow collaborator trait.
//!
//! [`BookingForm`](crate::BookingForm) only ever calls
//! [`BookingSubmitter::submit_booking`], so its pricing and validation logic
//! can be driven with an in-memory stub instead of a network.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config;
use crate::error::{BookingError, Result};
use crate::models::BookingRequest;

/// Delivers a validated booking to wherever bookings go.
///
/// Implementations return `Ok(())` once the booking is accepted and
/// [`BookingError::Submission`] when it is refused or cannot be delivered.
pub trait BookingSubmitter: Send + Sync + 'static {
    fn submit_booking(&self, request: &BookingRequest) -> impl Future<Output = Result<()>> + Send;
}

impl<S: BookingSubmitter> BookingSubmitter for Arc<S> {
    fn submit_booking(&self, request: &BookingRequest) -> impl Future<Output = Result<()>> + Send {
        (**self).submit_booking(request)
    }
}

// ---------------------------------------------------------------------------
// HttpSubmitter
// ---------------------------------------------------------------------------

/// POSTs the booking as JSON to the booking endpoint.
///
/// Any 2xx response is success. The response body is ignored.
pub struct HttpSubmitter {
    endpoint: String,
    client: Client,
}

impl fmt::Debug for HttpSubmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HttpSubmitter {{ endpoint: {} }}", self.endpoint)
    }
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self::with_client(endpoint, client))
    }

    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpSubmitter {
    fn default() -> Self {
        Self::with_client(config::DEFAULT_ENDPOINT, Client::new())
    }
}

impl BookingSubmitter for HttpSubmitter {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<()> {
        tracing::debug!(endpoint = %self.endpoint, "posting booking");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| BookingError::Submission {
                status: e.status().map(|s| s.as_u16()),
                message: format!("could not reach booking endpoint: {}", e),
            })?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BookingError::Submission {
                status: Some(status.as_u16()),
                message: format!("booking endpoint responded with {}", status),
            })
        }
    }
}
