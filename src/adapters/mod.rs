//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the trigger to external systems:
//! - `analysis` - Analysis server access (HTTP, mock)
//! - `view` - Output surfaces (in-memory, terminal, HTML)

pub mod analysis;
pub mod view;

pub use analysis::{HttpAnalysisService, HttpServiceConfig, MockAnalysisService};
pub use view::{HtmlView, InMemoryView, TerminalView};
