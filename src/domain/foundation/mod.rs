//! Foundation module - shared domain primitives.

mod ids;

pub use ids::ActivationId;
