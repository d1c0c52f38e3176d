//! Analysis Service Adapters.
//!
//! Implementations of the AnalysisService port.
//!
//! - `HttpAnalysisService` - The analysis server over HTTP
//! - `MockAnalysisService` - Configurable mock for testing

mod http_service;
mod mock_service;

pub use http_service::{HttpAnalysisService, HttpServiceConfig};
pub use mock_service::{MockAnalysisService, MockReply};
