//! Mock Analysis Service for testing.
//!
//! Provides a configurable implementation of the AnalysisService port so
//! the trigger and the views can be exercised without a running server.
//!
//! # Features
//!
//! - Queued replies, consumed in order
//! - Replies built from raw JSON, decoded the same way the HTTP adapter does
//! - Simulated latency for re-entrancy testing
//! - Call counting for verification
//!
//! # Example
//!
//! ```ignore
//! let service = MockAnalysisService::new()
//!     .with_json(r#"{"status":"error","error":"model unavailable"}"#)
//!     .with_delay(Duration::from_millis(50));
//!
//! let response = service.analyze().await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::analysis::{AnalysisResponse, ResultSet};
use crate::ports::{AnalysisService, HealthStatus, TransportError};

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return a decoded response.
    Response(AnalysisResponse),
    /// Fail at the transport level.
    Error(TransportError),
}

/// Mock analysis service.
#[derive(Debug, Clone)]
pub struct MockAnalysisService {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    health: Arc<Mutex<Result<HealthStatus, TransportError>>>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalysisService {
    /// Creates a mock that answers with an empty successful response.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            health: Arc::new(Mutex::new(Ok(HealthStatus {
                status: "healthy".to_string(),
            }))),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queues a decoded response.
    pub fn with_response(self, response: AnalysisResponse) -> Self {
        self.push(MockReply::Response(response));
        self
    }

    /// Queues a reply decoded from a raw body. An undecodable body queues
    /// the same `Decode` error the HTTP adapter would produce.
    pub fn with_json(self, body: &str) -> Self {
        let reply = match serde_json::from_str::<AnalysisResponse>(body) {
            Ok(response) => MockReply::Response(response),
            Err(err) => MockReply::Error(err.into()),
        };
        self.push(reply);
        self
    }

    /// Queues a transport failure.
    pub fn with_error(self, error: TransportError) -> Self {
        self.push(MockReply::Error(error));
        self
    }

    /// Sets the reply for `health`.
    pub fn with_health(self, health: Result<HealthStatus, TransportError>) -> Self {
        *self.health.lock().unwrap() = health;
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `analyze` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Response(AnalysisResponse::ok(ResultSet::new())))
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(&self) -> Result<AnalysisResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Response(response) => Ok(response),
            MockReply::Error(err) => Err(err),
        }
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        self.health.lock().unwrap().clone()
    }
}
