//! Per-run counters for the publisher loop

use chrono::{DateTime, Utc};
use std::fmt;

/// What the publisher has done since it started
#[derive(Debug, Clone)]
pub struct PublishStats {
    /// Number of send attempts (one per iteration)
    pub attempted: u64,
    /// Attempts that got any HTTP response back
    pub delivered: u64,
    /// Attempts that errored before a response
    pub failed: u64,
    pub started_at: DateTime<Utc>,
}

impl PublishStats {
    pub fn new() -> Self {
        Self {
            attempted: 0,
            delivered: 0,
            failed: 0,
            started_at: Utc::now(),
        }
    }

    /// Counted before the send is awaited, so an interrupted send still shows up
    pub fn record_attempt(&mut self) {
        self.attempted += 1;
    }

    pub fn record_delivered(&mut self) {
        self.delivered += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Attempts that never finished, e.g. cut short by shutdown
    pub fn in_flight(&self) -> u64 {
        self.attempted.saturating_sub(self.delivered + self.failed)
    }

    pub fn uptime(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

impl Default for PublishStats {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PublishStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attempted, {} delivered, {} failed in {}s",
            self.attempted,
            self.delivered,
            self.failed,
            self.uptime().num_seconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = PublishStats::new();
        assert_eq!(stats.attempted, 0);
        assert_eq!(stats.delivered, 0);
        assert_eq!(stats.failed, 0);
    }

    #[test]
    fn test_stats_record() {
        let mut stats = PublishStats::new();
        for _ in 0..3 {
            stats.record_attempt();
        }
        stats.record_delivered();
        stats.record_failed();
        stats.record_delivered();
        assert_eq!(stats.attempted, 3);
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.in_flight(), 0);
    }

    #[test]
    fn test_stats_attempt_without_outcome() {
        let mut stats = PublishStats::new();
        stats.record_attempt();
        assert_eq!(stats.attempted, 1);
        assert_eq!(stats.in_flight(), 1);
    }

    #[test]
    fn test_stats_display() {
        let mut stats = PublishStats::new();
        stats.record_attempt();
        stats.record_failed();
        let text = stats.to_string();
        assert!(text.starts_with("1 attempted, 0 delivered, 1 failed in "));
    }
}
