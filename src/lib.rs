//! orderpub - demo order event publisher
//!
//! Builds a "new order" event every interval and POSTs it to a local sidecar's
//! `/publish` endpoint. Failures are reported and the loop carries on.

pub mod config;
pub mod error;
pub mod event;
pub mod preset;
pub mod publisher;
pub mod transport;

pub use error::{OrderpubError, Result};
