//! Application layer - Handlers.
//!
//! This layer drives the ports in response to user actions.

pub mod handlers;

pub use handlers::{ActivationOutcome, AnalysisTrigger};
