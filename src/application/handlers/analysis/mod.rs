//! Analysis handlers.
//!
//! Handlers that trigger a server-side analysis and render its outcome.

mod analysis_trigger_handler;

pub use analysis_trigger_handler::{ActivationOutcome, AnalysisTrigger};
