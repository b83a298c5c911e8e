//! Transport trait and shared types

use async_trait::async_trait;

use crate::event::EventRecord;

/// Delivers one event to the sidecar.
///
/// One call per loop iteration, no retries at this layer.
#[async_trait]
pub trait EventTransport: Send + Sync {
    async fn send_event(&self, event: &EventRecord) -> Result<Delivery, PublishError>;

    /// Where events go, for logs and the run banner
    fn endpoint(&self) -> &str;
}

/// What came back from a send that did not error.
///
/// The status is kept for logging only; a non-2xx status is not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
}

impl Delivery {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors raised while sending an event
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl PublishError {
    pub fn is_timeout(&self) -> bool {
        match self {
            PublishError::Request(e) => e.is_timeout(),
            _ => false,
        }
    }

    pub fn is_connect(&self) -> bool {
        match self {
            PublishError::Request(e) => e.is_connect(),
            _ => false,
        }
    }
}
