//! Transport layer - how events reach the sidecar
//!
//! This module provides:
//! - EventTransport trait (one method: send an event)
//! - HttpTransport, a reqwest POST to the sidecar publish endpoint
//! - MockTransport for tests

pub mod client;
pub mod http;
pub mod mock;

pub use client::{Delivery, EventTransport, PublishError};
pub use http::{DEFAULT_PUBLISH_URL, HttpTransport, HttpTransportConfig};
pub use mock::{MockTransport, SentEvent};
