//! AnalysisView port - Output surface for the analysis trigger.
//!
//! Replaces direct lookups of page elements with an injected interface that
//! owns the status region, the results container and the activation control.

use crate::domain::analysis::{ResultBlock, StatusMessage};

/// Port for rendering trigger state.
///
/// Methods are synchronous and take `&self`; adapters use interior
/// mutability. They are called from the trigger's drop guard, so they must
/// not panic.
pub trait AnalysisView: Send + Sync {
    /// Replace the status text.
    fn set_status(&self, status: &StatusMessage);

    /// Remove every rendered result block.
    fn clear_results(&self);

    /// Append one result block to the results container.
    fn add_result_block(&self, block: &ResultBlock);

    /// Toggle the busy indicator. `true` disables the activation control and
    /// shows the busy label, `false` restores the idle label.
    fn set_busy(&self, busy: bool);
}
