//! In-memory transport for tests and dry runs

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::event::EventRecord;
use crate::transport::client::{Delivery, EventTransport, PublishError};

#[derive(Debug, Clone)]
pub struct SentEvent {
    pub event: EventRecord,
    pub at: Instant,
}

#[derive(Debug, Default)]
struct MockState {
    attempts: usize,
    sent: Vec<SentEvent>,
}

/// Records every event it is handed.
///
/// Clones share state, so a test can keep one handle while the publisher
/// owns another. Attempts listed in `fail_on` (1-based) return an error but
/// are still recorded.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    fail_on: HashSet<usize>,
    fail_all: bool,
    latency: Duration,
    status: u16,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            fail_on: HashSet::new(),
            fail_all: false,
            latency: Duration::ZERO,
            status: 200,
        }
    }

    /// Fail every attempt
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new()
        }
    }

    /// Fail the given attempt numbers (1-based)
    pub fn fail_on(mut self, attempts: impl IntoIterator<Item = usize>) -> Self {
        self.fail_on.extend(attempts);
        self
    }

    /// Simulated request duration
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Status returned on non-failing attempts
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    pub fn sent(&self) -> Vec<SentEvent> {
        self.lock().sent.clone()
    }

    pub fn events(&self) -> Vec<EventRecord> {
        self.lock().sent.iter().map(|s| s.event.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventTransport for MockTransport {
    async fn send_event(&self, event: &EventRecord) -> Result<Delivery, PublishError> {
        let attempt = {
            let mut state = self.lock();
            state.attempts += 1;
            state.sent.push(SentEvent {
                event: event.clone(),
                at: Instant::now(),
            });
            state.attempts
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.fail_all || self.fail_on.contains(&attempt) {
            return Err(PublishError::Transport(format!("simulated failure on attempt {}", attempt)));
        }

        Ok(Delivery::new(self.status))
    }

    fn endpoint(&self) -> &str {
        "mock://publish"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::OrderId;

    fn event(n: u64) -> EventRecord {
        EventRecord::new("neworder", OrderId::Counter(n), "t")
    }

    #[tokio::test]
    async fn test_mock_records_events() {
        let mock = MockTransport::new();
        let handle = mock.clone();

        mock.send_event(&event(1)).await.unwrap();
        mock.send_event(&event(2)).await.unwrap();

        assert_eq!(handle.attempts(), 2);
        let ids: Vec<OrderId> = handle.events().iter().map(|e| e.order_id().clone()).collect();
        assert_eq!(ids, vec![OrderId::Counter(1), OrderId::Counter(2)]);
    }

    #[tokio::test]
    async fn test_mock_fail_on() {
        let mock = MockTransport::new().fail_on([2]);

        assert!(mock.send_event(&event(1)).await.is_ok());
        assert!(mock.send_event(&event(2)).await.is_err());
        assert!(mock.send_event(&event(3)).await.is_ok());
        assert_eq!(mock.attempts(), 3);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let mock = MockTransport::failing();
        let err = mock.send_event(&event(1)).await.unwrap_err();
        assert!(err.to_string().contains("attempt 1"));
    }

    #[tokio::test]
    async fn test_mock_status() {
        let mock = MockTransport::new().with_status(503);
        let delivery = mock.send_event(&event(1)).await.unwrap();
        assert_eq!(delivery.status, 503);
        assert!(!delivery.is_success());
    }
}
