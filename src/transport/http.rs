//! reqwest-backed transport that POSTs events to the sidecar

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{OrderpubError, Result};
use crate::event::EventRecord;
use crate::transport::client::{Delivery, EventTransport, PublishError};

/// Sidecar publish endpoint used when nothing else is configured
pub const DEFAULT_PUBLISH_URL: &str = "http://localhost:3501/publish";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PUBLISH_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpTransportConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OrderpubError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl EventTransport for HttpTransport {
    async fn send_event(&self, event: &EventRecord) -> std::result::Result<Delivery, PublishError> {
        let body = event.to_json()?;

        let response = self
            .client
            .post(&self.config.url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;

        Ok(Delivery::new(response.status().as_u16()))
    }

    fn endpoint(&self) -> &str {
        &self.config.url
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.config.url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpTransportConfig::default();
        assert_eq!(config.url, DEFAULT_PUBLISH_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_with_url() {
        let config = HttpTransportConfig::with_url("http://python-action:3501/publish");
        assert_eq!(config.url, "http://python-action:3501/publish");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_transport_endpoint() {
        let transport = HttpTransport::new(HttpTransportConfig::default()).unwrap();
        assert_eq!(transport.endpoint(), DEFAULT_PUBLISH_URL);
    }

    #[tokio::test]
    async fn test_send_to_closed_port_is_error() {
        // Port 9 (discard) is closed on any sane test host
        let config = HttpTransportConfig {
            url: "http://127.0.0.1:9/publish".to_string(),
            timeout: Duration::from_secs(2),
        };
        let transport = HttpTransport::new(config).unwrap();
        let event = EventRecord::new("neworder", crate::event::OrderId::Counter(1), "t");

        let result = transport.send_event(&event).await;
        assert!(matches!(result, Err(PublishError::Request(_))));
    }
}
