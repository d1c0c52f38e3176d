//! Analysis server client configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Connection settings for the analysis server
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Server root the `/analyze` and `/health` paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate client configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("CLIENT__BASE_URL"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
