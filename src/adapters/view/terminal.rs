//! Terminal View Adapter
//!
//! Writes status changes and result blocks as plain text. Output is
//! append-only, so `clear_results` prints a [`SECTION_SEPARATOR`] line and
//! everything after it belongs to the new activation.

use std::io::{self, Write};
use std::sync::Mutex;
use tracing::{trace, warn};

use crate::domain::analysis::{button_label, ResultBlock, StatusMessage};
use crate::ports::AnalysisView;

/// Line printed when earlier results are cleared.
pub const SECTION_SEPARATOR: &str = "----------------------------------------";

/// Plain-text view over any writer.
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalView<io::Stdout> {
    /// View writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consumes the view and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!(error = %err, "Failed to write to terminal");
        }
    }
}

/// Formats one block as indented lines under a heading.
pub fn format_block(block: &ResultBlock) -> String {
    let mut text = format!("== {} ==\n", block.pair);
    text.push_str(&format!("  {}\n", block.headline()));
    text.push_str(&format!("  Mode: {}\n", block.mode));
    text.push_str(&format!("  Prob CALL: {}\n", block.prob_call));
    text.push_str(&format!("  Last candle: {}\n", block.last_candle));
    if !block.reason.is_empty() {
        text.push_str(&format!("  {}\n", block.reason));
    }
    text
}

impl<W: Write + Send> AnalysisView for TerminalView<W> {
    fn set_status(&self, status: &StatusMessage) {
        self.write(&format!("{}\n", status));
    }

    fn clear_results(&self) {
        self.write(&format!("{}\n", SECTION_SEPARATOR));
        trace!("Results cleared");
    }

    fn add_result_block(&self, block: &ResultBlock) {
        self.write(&format!("\n{}", format_block(block)));
    }

    fn set_busy(&self, busy: bool) {
        trace!(label = button_label(busy), busy, "Activation state changed");
    }
}
