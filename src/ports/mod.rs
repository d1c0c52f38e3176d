//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the trigger and the outside world. Adapters implement these ports.
//!
//! - `AnalysisService` - Runs the server-side analysis job
//! - `AnalysisView` - Status, results and busy state output

mod analysis_service;
mod analysis_view;

pub use analysis_service::{AnalysisService, HealthStatus, TransportError};
pub use analysis_view::AnalysisView;
