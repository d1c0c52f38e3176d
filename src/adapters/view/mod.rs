//! View Adapters.
//!
//! Implementations of the AnalysisView port.
//!
//! - `InMemoryView` - Records rendered state for tests and embedding
//! - `TerminalView` - Plain-text output to a writer
//! - `HtmlView` - Page model rendered with the host page's markup

mod html;
mod in_memory;
mod terminal;

pub use html::{escape_html, render_block, HtmlView};
pub use in_memory::{InMemoryView, ViewEvent};
pub use terminal::{format_block, TerminalView, SECTION_SEPARATOR};
