//! Error types for orderpub
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in orderpub
#[derive(Debug, Error)]
pub enum OrderpubError {
    /// Outbound request to the sidecar failed
    #[error("Request failed: {0}")]
    Request(String),

    /// Preset name not found among built-ins or config
    #[error("Unknown preset: {name} (known: {known})")]
    UnknownPreset { name: String, known: String },

    /// Configuration values that cannot be used
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for orderpub operations
pub type Result<T> = std::result::Result<T, OrderpubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error() {
        let err = OrderpubError::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn test_unknown_preset_error() {
        let err = OrderpubError::UnknownPreset {
            name: "nope".to_string(),
            known: "fixed, queue, sns".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown preset: nope (known: fixed, queue, sns)");
    }

    #[test]
    fn test_invalid_config_error() {
        let err = OrderpubError::InvalidConfig("publisher.interval_ms must be > 0".to_string());
        assert!(err.to_string().contains("interval_ms"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_err() -> Result<()> {
            Err(OrderpubError::InvalidConfig("preset x has no destination".to_string()))
        }

        assert!(returns_err().is_err());
    }
}
