//! Event publisher loop and its run statistics.

pub mod publisher_loop;
pub mod stats;

pub use publisher_loop::{DEFAULT_INTERVAL, Publisher};
pub use stats::PublishStats;
