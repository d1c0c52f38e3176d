//! Domain layer containing the analysis types and rendering rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers)
//! - `analysis` - Analysis response model, result blocks and status messages

pub mod analysis;
pub mod foundation;
