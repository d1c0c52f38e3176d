//! AnalysisService port - Interface to the pair-analysis server.
//!
//! This port hides how the analysis job is reached (HTTP, in-process mock)
//! from the trigger that drives it.
//!
//! # Example
//!
//! ```ignore
//! let response = service.analyze().await?;
//! match response {
//!     AnalysisResponse::Ok { results } => render(results),
//!     AnalysisResponse::Failed { error, .. } => show(error),
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::analysis::AnalysisResponse;

/// Port for triggering server-side analysis.
///
/// Implementations issue exactly one request per `analyze` call and never
/// retry. Application-level failures reported by the server are returned
/// as `Ok(AnalysisResponse::Failed { .. })`; only transport and decode
/// failures are errors.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Run one analysis job and decode the reply.
    async fn analyze(&self) -> Result<AnalysisResponse, TransportError>;

    /// Checks the server's liveness endpoint.
    async fn health(&self) -> Result<HealthStatus, TransportError>;
}

/// Reply from the liveness endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Failures below the application level.
///
/// The `Display` text is the detail shown after `Request failed: `.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, reset, DNS failure and the like.
    #[error("network error: {0}")]
    Network(String),

    /// The configured request timeout elapsed.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The body was not valid JSON or did not match the response shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The endpoint URL could not be built from the configured base URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        TransportError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        TransportError::Decode(message.into())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}
