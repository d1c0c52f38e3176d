//! Application handlers.
//!
//! Handlers that orchestrate ports on behalf of a user action.

pub mod analysis;

pub use analysis::{ActivationOutcome, AnalysisTrigger};
