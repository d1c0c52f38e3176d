//! HTTP Analysis Service - Implementation of AnalysisService over `reqwest`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpServiceConfig::new("http://127.0.0.1:5000")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let service = HttpAnalysisService::new(config)?;
//! let response = service.analyze().await?;
//! ```
//!
//! # Wire behaviour
//!
//! `analyze` sends `POST {base_url}/analyze` with an empty body and default
//! headers. The HTTP status code is not inspected: the server reports
//! failures in the JSON body, so the body is decoded whatever the status.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::domain::analysis::AnalysisResponse;
use crate::ports::{AnalysisService, HealthStatus, TransportError};

const ANALYZE_PATH: &str = "analyze";
const HEALTH_PATH: &str = "health";

/// Configuration for the HTTP analysis service.
#[derive(Debug, Clone)]
pub struct HttpServiceConfig {
    /// Server root, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Request timeout. `None` waits for as long as the server takes.
    pub timeout: Option<Duration>,
}

impl HttpServiceConfig {
    /// Creates a configuration without a timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl From<&ClientConfig> for HttpServiceConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Analysis server reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    config: HttpServiceConfig,
    client: Client,
}

impl HttpAnalysisService {
    /// Creates a new service with the given configuration.
    pub fn new(config: HttpServiceConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds `{base_url}/{path}`, keeping any path prefix on the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        let base = format!("{}/", self.config.base_url.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|url| url.join(path))
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", self.config.base_url, e)))
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.config.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
        } else if err.is_connect() {
            TransportError::network(format!("Connection failed: {}", err))
        } else {
            TransportError::network(err.to_string())
        }
    }

    /// Reads the whole body and decodes it as JSON.
    async fn decode_body<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?;

        debug!(http_status = %status, body_len = body.len(), "Received response body");

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self) -> Result<AnalysisResponse, TransportError> {
        let url = self.endpoint(ANALYZE_PATH)?;
        debug!(%url, "Requesting analysis");

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.decode_body(response).await
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        let url = self.endpoint(HEALTH_PATH)?;
        debug!(%url, "Probing server health");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.decode_body(response).await
    }
}
