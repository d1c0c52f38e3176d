//! AnalysisTrigger - Handler for a user-initiated analysis activation.
//!
//! One activation:
//! 1. Marks the view busy (activation control disabled, busy label)
//! 2. Clears earlier results and shows the in-progress status
//! 3. Requests one analysis job from the server
//! 4. Renders the outcome: result blocks, a server error, or a request failure
//! 5. Releases the busy state, on every exit path
//!
//! Step 5 is owned by [`BusyGuard`], so it also runs if the activation
//! future is dropped before the server answers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::domain::analysis::{
    AnalysisResponse, ResultBlock, ResultSet, StatusMessage, UNKNOWN_ERROR,
};
use crate::domain::foundation::ActivationId;
use crate::ports::{AnalysisService, AnalysisView};

/// How an activation ended.
///
/// Every variant has already been rendered to the view; none of them is an
/// error the caller has to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Results were rendered.
    Completed { blocks: usize },
    /// The server reported a non-success status.
    Rejected { message: String },
    /// The request failed or the body could not be decoded.
    Failed { detail: String },
    /// Another activation was still in flight; nothing was done.
    AlreadyRunning,
}

impl ActivationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActivationOutcome::Completed { .. })
    }
}

/// Drives the analysis request and renders its outcome.
pub struct AnalysisTrigger {
    service: Arc<dyn AnalysisService>,
    view: Arc<dyn AnalysisView>,
    in_flight: AtomicBool,
}

impl AnalysisTrigger {
    /// Creates a new AnalysisTrigger.
    pub fn new(service: Arc<dyn AnalysisService>, view: Arc<dyn AnalysisView>) -> Self {
        Self {
            service,
            view,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns true while an activation is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Runs one activation.
    ///
    /// Returns [`ActivationOutcome::AlreadyRunning`] without touching the
    /// view or the server if an earlier activation has not finished.
    pub async fn activate(&self) -> ActivationOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.in_flight, self.view.as_ref()) else {
            debug!("Activation ignored, request already in flight");
            return ActivationOutcome::AlreadyRunning;
        };

        let activation_id = ActivationId::new();
        let span = info_span!("analysis_activation", activation_id = %activation_id);

        self.run().instrument(span).await
    }

    async fn run(&self) -> ActivationOutcome {
        self.view.clear_results();
        self.view.set_status(&StatusMessage::InProgress);

        let started = Instant::now();
        let reply = self.service.analyze().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match reply {
            Ok(AnalysisResponse::Ok { results }) => {
                let blocks = self.render_results(&results);
                info!(pairs = blocks, elapsed_ms, "Analysis completed");
                ActivationOutcome::Completed { blocks }
            }
            Ok(AnalysisResponse::Failed {
                status,
                error,
                trace,
            }) => {
                if let Some(trace) = trace {
                    debug!(trace = %trace, "Server trace for failed analysis");
                }
                warn!(
                    status = status.as_deref().unwrap_or("<missing>"),
                    error = error.as_deref().unwrap_or(UNKNOWN_ERROR),
                    elapsed_ms,
                    "Analysis rejected by server"
                );

                self.view
                    .set_status(&StatusMessage::from_server_error(error.as_deref()));
                ActivationOutcome::Rejected {
                    message: error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
                }
            }
            Err(err) => {
                warn!(error = %err, elapsed_ms, "Analysis request failed");

                let detail = err.to_string();
                self.view
                    .set_status(&StatusMessage::RequestFailed(detail.clone()));
                ActivationOutcome::Failed { detail }
            }
        }
    }

    /// Shows the completion status, then one block per pair in wire order.
    fn render_results(&self, results: &ResultSet) -> usize {
        self.view.set_status(&StatusMessage::Done);

        for (pair, result) in results {
            if result.is_pair_error() {
                warn!(
                    pair,
                    reason = result.reason.as_deref().unwrap_or(""),
                    "Server could not analyse pair"
                );
            }
            self.view
                .add_result_block(&ResultBlock::from_result(pair, result));
        }

        results.len()
    }
}

/// Holds the busy state for the lifetime of one activation.
struct BusyGuard<'a> {
    in_flight: &'a AtomicBool,
    view: &'a dyn AnalysisView,
}

impl<'a> BusyGuard<'a> {
    /// Claims the in-flight flag and marks the view busy. Returns `None`
    /// if the flag is already held.
    fn acquire(in_flight: &'a AtomicBool, view: &'a dyn AnalysisView) -> Option<Self> {
        in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        view.set_busy(true);
        Some(Self { in_flight, view })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.view.set_busy(false);
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::analysis::MockAnalysisService;
    use crate::adapters::view::{InMemoryView, ViewEvent};
    use crate::domain::analysis::AnalysisResult;
    use crate::ports::TransportError;
    use proptest::prelude::*;
    use std::time::Duration;

    const EXAMPLE_OK: &str = r#"{"status":"ok","results":{"EURUSD":{"prediction":"call","confidence":87,"mode":"auto","reason":"trend up","last_candle":{"o":1.1,"h":1.2,"l":1.05,"c":1.18},"prob_call":0.72}}}"#;

    fn trigger_with(service: MockAnalysisService) -> (AnalysisTrigger, InMemoryView) {
        let view = InMemoryView::new();
        let trigger = AnalysisTrigger::new(Arc::new(service), Arc::new(view.clone()));
        (trigger, view)
    }

    fn assert_idle(view: &InMemoryView) {
        assert!(view.button_enabled());
        assert_eq!(view.button_label(), "Analyze");
    }

    #[tokio::test]
    async fn renders_successful_response() {
        let (trigger, view) = trigger_with(MockAnalysisService::new().with_json(EXAMPLE_OK));

        let outcome = trigger.activate().await;

        assert_eq!(outcome, ActivationOutcome::Completed { blocks: 1 });
        assert_eq!(view.status_text(), "Done");
        let blocks = view.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].pair, "EURUSD");
        assert_eq!(blocks[0].headline(), "CALL 87%");
        assert_eq!(blocks[0].mode, "auto");
        assert_eq!(blocks[0].prob_call, "0.72");
        assert_eq!(blocks[0].last_candle, "O:1.1 H:1.2 L:1.05 C:1.18");
        assert_eq!(blocks[0].reason, "trend up");
        assert_idle(&view);
    }

    #[tokio::test]
    async fn shows_server_error_message() {
        let (trigger, view) = trigger_with(
            MockAnalysisService::new().with_json(r#"{"status":"error","error":"model unavailable"}"#),
        );

        let outcome = trigger.activate().await;

        assert_eq!(
            outcome,
            ActivationOutcome::Rejected {
                message: "model unavailable".into()
            }
        );
        assert_eq!(view.status_text(), "Error: model unavailable");
        assert_eq!(view.block_count(), 0);
        assert_idle(&view);
    }

    #[tokio::test]
    async fn server_error_without_message_shows_unknown() {
        let (trigger, view) =
            trigger_with(MockAnalysisService::new().with_json(r#"{"status":"error"}"#));

        trigger.activate().await;

        assert_eq!(view.status_text(), "Error: unknown");
        assert_eq!(view.block_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_shows_request_failed() {
        let (trigger, view) = trigger_with(
            MockAnalysisService::new().with_error(TransportError::network("connection refused")),
        );

        let outcome = trigger.activate().await;

        assert!(matches!(outcome, ActivationOutcome::Failed { .. }));
        assert!(view.status_text().starts_with("Request failed: "));
        assert!(view.status_text().contains("connection refused"));
        assert_eq!(view.block_count(), 0);
        assert_idle(&view);
    }

    #[tokio::test]
    async fn malformed_body_is_a_request_failure() {
        let (trigger, view) =
            trigger_with(MockAnalysisService::new().with_json("<html>Bad Gateway</html>"));

        let outcome = trigger.activate().await;

        assert!(matches!(outcome, ActivationOutcome::Failed { .. }));
        assert!(view.status_text().starts_with("Request failed: "));
        assert_idle(&view);
    }

    #[tokio::test]
    async fn steps_happen_in_order() {
        let (trigger, view) = trigger_with(MockAnalysisService::new().with_json(EXAMPLE_OK));

        trigger.activate().await;

        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Busy(true),
                ViewEvent::Cleared,
                ViewEvent::Status(StatusMessage::InProgress),
                ViewEvent::Status(StatusMessage::Done),
                ViewEvent::Block("EURUSD".into()),
                ViewEvent::Busy(false),
            ]
        );
    }

    #[tokio::test]
    async fn blocks_follow_wire_order() {
        let (trigger, view) = trigger_with(MockAnalysisService::new().with_json(
            r#"{"status":"ok","results":{"USD/JPY":{},"EUR/USD":{},"AUD/CAD":{}}}"#,
        ));

        trigger.activate().await;

        let pairs: Vec<String> = view.blocks().into_iter().map(|b| b.pair).collect();
        assert_eq!(pairs, vec!["USD/JPY", "EUR/USD", "AUD/CAD"]);
    }

    #[tokio::test]
    async fn pair_level_errors_are_still_rendered() {
        let (trigger, view) = trigger_with(MockAnalysisService::new().with_json(
            r#"{"status":"ok","results":{"EUR/USD":{"pair":"EUR/USD","status":"error","prediction":"ERROR","confidence":0,"reason":"Pair error: timeout"}}}"#,
        ));

        let outcome = trigger.activate().await;

        assert_eq!(outcome, ActivationOutcome::Completed { blocks: 1 });
        let block = &view.blocks()[0];
        assert_eq!(block.headline(), "ERROR 0%");
        assert_eq!(block.reason, "Pair error: timeout");
        assert_eq!(block.last_candle, "N/A");
    }

    #[tokio::test]
    async fn repeated_activation_leaves_no_residue() {
        let (trigger, view) = trigger_with(
            MockAnalysisService::new()
                .with_json(r#"{"status":"ok","results":{"A":{},"B":{},"C":{}}}"#)
                .with_json(r#"{"status":"ok","results":{"D":{}}}"#)
                .with_json(r#"{"status":"error","error":"busy"}"#),
        );

        trigger.activate().await;
        assert_eq!(view.block_count(), 3);

        trigger.activate().await;
        let pairs: Vec<String> = view.blocks().into_iter().map(|b| b.pair).collect();
        assert_eq!(pairs, vec!["D"]);

        trigger.activate().await;
        assert_eq!(view.block_count(), 0);
        assert_eq!(view.status_text(), "Error: busy");
    }

    #[tokio::test]
    async fn second_activation_while_in_flight_is_ignored() {
        let service = MockAnalysisService::new()
            .with_json(EXAMPLE_OK)
            .with_delay(Duration::from_millis(50));
        let view = InMemoryView::new();
        let trigger = AnalysisTrigger::new(Arc::new(service.clone()), Arc::new(view.clone()));

        let (first, second) = tokio::join!(trigger.activate(), trigger.activate());

        assert_eq!(first, ActivationOutcome::Completed { blocks: 1 });
        assert_eq!(second, ActivationOutcome::AlreadyRunning);
        assert_eq!(service.call_count(), 1);
        assert!(!trigger.is_busy());
        assert_idle(&view);
    }

    #[tokio::test]
    async fn dropped_activation_releases_busy_state() {
        let service = MockAnalysisService::new().with_delay(Duration::from_secs(60));
        let (trigger, view) = trigger_with(service);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), trigger.activate()).await;

        assert!(timed_out.is_err());
        assert!(!trigger.is_busy());
        assert_idle(&view);
    }

    #[tokio::test]
    async fn activation_after_completion_is_accepted() {
        let service = MockAnalysisService::new();
        let (trigger, _view) = trigger_with(service.clone());

        assert!(trigger.activate().await.is_success());
        assert!(trigger.activate().await.is_success());
        assert_eq!(service.call_count(), 2);
    }

    fn pair_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set("[A-Z]{3}/[A-Z]{3}", 0..12)
            .prop_map(|set| set.into_iter().collect())
    }

    fn run_activation(service: MockAnalysisService) -> (ActivationOutcome, InMemoryView) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (trigger, view) = trigger_with(service);
        let outcome = runtime.block_on(trigger.activate());
        (outcome, view)
    }

    proptest! {
        #[test]
        fn one_block_per_result(pairs in pair_names()) {
            let results: ResultSet = pairs
                .iter()
                .map(|p| (p.clone(), AnalysisResult::default()))
                .collect();
            let service = MockAnalysisService::new().with_response(AnalysisResponse::ok(results));

            let (outcome, view) = run_activation(service);

            prop_assert_eq!(outcome, ActivationOutcome::Completed { blocks: pairs.len() });
            let headings: Vec<String> = view.blocks().into_iter().map(|b| b.pair).collect();
            prop_assert_eq!(headings, pairs);
            prop_assert!(view.button_enabled());
        }

        #[test]
        fn failure_status_renders_no_blocks(
            status in "[a-z]{1,8}".prop_filter("not the success sentinel", |s| s != "ok"),
            error in proptest::option::of("[a-zA-Z ]{1,30}"),
        ) {
            let service = MockAnalysisService::new().with_response(AnalysisResponse::Failed {
                status: Some(status),
                error: error.clone(),
                trace: None,
            });

            let (_, view) = run_activation(service);

            prop_assert_eq!(view.block_count(), 0);
            let expected = format!("Error: {}", error.as_deref().unwrap_or("unknown"));
            prop_assert_eq!(view.status_text(), expected);
            prop_assert!(view.button_enabled());
        }
    }
}
