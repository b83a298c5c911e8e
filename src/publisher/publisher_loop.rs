//! The publish loop: build event, send, report failure, sleep, repeat.

use std::future::Future;
use std::time::Duration;

use colored::*;

use crate::event::{EventRecord, OrderId};
use crate::preset::{OrderIdSource, Preset};
use crate::publisher::stats::PublishStats;
use crate::transport::{Delivery, EventTransport, PublishError};

/// Pause between iterations when nothing else is configured
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

pub struct Publisher<T: EventTransport> {
    transport: T,
    preset: Preset,
    interval: Duration,
    /// Last order id handed out; 0 before the first iteration
    counter: u64,
    stats: PublishStats,
}

impl<T: EventTransport> Publisher<T> {
    pub fn new(transport: T, preset: Preset, interval: Duration) -> Self {
        Self {
            transport,
            preset,
            interval,
            counter: 0,
            stats: PublishStats::new(),
        }
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> &PublishStats {
        &self.stats
    }

    /// Build the next event, advancing the counter for counter presets
    pub fn next_event(&mut self) -> EventRecord {
        let order_id = match &self.preset.order_id {
            OrderIdSource::Counter => {
                self.counter += 1;
                OrderId::Counter(self.counter)
            }
            OrderIdSource::Fixed(literal) => OrderId::Literal(literal.clone()),
        };

        EventRecord::new(&self.preset.event_name, order_id, &self.preset.destination)
    }

    /// One send attempt without the trailing sleep
    pub async fn publish_once(&mut self) -> Result<Delivery, PublishError> {
        let event = self.next_event();
        self.stats.record_attempt();

        match self.transport.send_event(&event).await {
            Ok(delivery) => {
                self.stats.record_delivered();
                tracing::debug!(
                    preset = %self.preset.name,
                    order_id = %event.order_id(),
                    status = delivery.status,
                    success = delivery.is_success(),
                    "Event published"
                );
                Ok(delivery)
            }
            Err(e) => {
                self.stats.record_failed();
                tracing::warn!(
                    preset = %self.preset.name,
                    order_id = %event.order_id(),
                    endpoint = %self.transport.endpoint(),
                    error = %e,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    "Publish failed"
                );
                Err(e)
            }
        }
    }

    /// Send, print any failure, then sleep the full interval
    async fn iterate(&mut self) {
        if let Err(e) = self.publish_once().await {
            eprintln!("{} {}", "publish failed:".red(), e);
        }

        tokio::time::sleep(self.interval).await;
    }

    /// Loop forever; only process exit stops it
    pub async fn run(&mut self) {
        loop {
            self.iterate().await;
        }
    }

    /// Run exactly `iterations` send-and-sleep cycles
    pub async fn run_iterations(&mut self, iterations: u64) {
        for _ in 0..iterations {
            self.iterate().await;
        }
    }

    /// Run the endless loop until `shutdown` resolves. A send in flight is
    /// abandoned but still counted as attempted.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = shutdown => {
                log::info!(
                    "Shutdown requested after {} attempts ({} in flight)",
                    self.stats.attempted,
                    self.stats.in_flight()
                );
            }
            _ = self.run() => {}
        }
    }
}
