//! In-Memory View Adapter
//!
//! Records everything the trigger renders. Useful for tests and for hosts
//! that want to read the rendered state back instead of displaying it.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::analysis::{button_label, ResultBlock, StatusMessage};
use crate::ports::AnalysisView;

/// One call made on the view, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Status(StatusMessage),
    Cleared,
    Block(String),
    Busy(bool),
}

#[derive(Debug, Default)]
struct ViewState {
    status: Option<StatusMessage>,
    blocks: Vec<ResultBlock>,
    busy: bool,
    events: Vec<ViewEvent>,
}

/// In-memory output surface.
#[derive(Debug, Clone, Default)]
pub struct InMemoryView {
    state: Arc<Mutex<ViewState>>,
}

impl InMemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds usable state; the drop guard must not panic.
    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current status message, if any was set.
    pub fn status(&self) -> Option<StatusMessage> {
        self.state().status.clone()
    }

    /// Current status text, empty when unset.
    pub fn status_text(&self) -> String {
        self.state()
            .status
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Blocks currently in the results container.
    pub fn blocks(&self) -> Vec<ResultBlock> {
        self.state().blocks.clone()
    }

    pub fn block_count(&self) -> usize {
        self.state().blocks.len()
    }

    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    /// Whether the activation control accepts input.
    pub fn button_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn button_label(&self) -> &'static str {
        button_label(self.is_busy())
    }

    /// Every call received so far.
    pub fn events(&self) -> Vec<ViewEvent> {
        self.state().events.clone()
    }
}

impl AnalysisView for InMemoryView {
    fn set_status(&self, status: &StatusMessage) {
        let mut state = self.state();
        state.status = Some(status.clone());
        state.events.push(ViewEvent::Status(status.clone()));
    }

    fn clear_results(&self) {
        let mut state = self.state();
        state.blocks.clear();
        state.events.push(ViewEvent::Cleared);
    }

    fn add_result_block(&self, block: &ResultBlock) {
        let mut state = self.state();
        state.blocks.push(block.clone());
        state.events.push(ViewEvent::Block(block.pair.clone()));
    }

    fn set_busy(&self, busy: bool) {
        let mut state = self.state();
        state.busy = busy;
        state.events.push(ViewEvent::Busy(busy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisResult;

    #[test]
    fn starts_idle_and_empty() {
        let view = InMemoryView::new();
        assert!(view.button_enabled());
        assert_eq!(view.button_label(), "Analyze");
        assert_eq!(view.status_text(), "");
        assert_eq!(view.block_count(), 0);
    }

    #[test]
    fn records_calls_in_order() {
        let view = InMemoryView::new();
        view.set_busy(true);
        view.clear_results();
        view.set_status(&StatusMessage::Done);
        view.add_result_block(&ResultBlock::from_result("EURUSD", &AnalysisResult::default()));

        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Busy(true),
                ViewEvent::Cleared,
                ViewEvent::Status(StatusMessage::Done),
                ViewEvent::Block("EURUSD".into()),
            ]
        );
        assert_eq!(view.button_label(), "In Progress...");
    }

    #[test]
    fn clear_removes_blocks() {
        let view = InMemoryView::new();
        view.add_result_block(&ResultBlock::from_result("A", &AnalysisResult::default()));
        view.add_result_block(&ResultBlock::from_result("B", &AnalysisResult::default()));
        view.clear_results();
        assert_eq!(view.block_count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let view = InMemoryView::new();
        let handle = view.clone();
        view.set_status(&StatusMessage::InProgress);
        assert_eq!(handle.status(), Some(StatusMessage::InProgress));
    }
}
