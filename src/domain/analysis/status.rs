//! Status line messages and button labels.

use std::fmt;

/// Label of the activation control while idle.
pub const IDLE_LABEL: &str = "Analyze";

/// Label of the activation control while a request is in flight.
pub const BUSY_LABEL: &str = "In Progress...";

/// Fallback shown when a failed response carries no error text.
pub const UNKNOWN_ERROR: &str = "unknown";

/// Text shown in the status region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Request issued, waiting for the server.
    InProgress,
    /// Results rendered.
    Done,
    /// Server answered with a non-success status.
    Error(String),
    /// Request could not complete or the body could not be decoded.
    RequestFailed(String),
}

impl StatusMessage {
    /// Builds the application-error message, substituting `unknown` when the
    /// server sent no error text.
    pub fn from_server_error(error: Option<&str>) -> Self {
        StatusMessage::Error(error.unwrap_or(UNKNOWN_ERROR).to_string())
    }

    /// Returns true for `Error` and `RequestFailed`.
    pub fn is_failure(&self) -> bool {
        matches!(self, StatusMessage::Error(_) | StatusMessage::RequestFailed(_))
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::InProgress => write!(f, "Training & predicting — please wait"),
            StatusMessage::Done => write!(f, "Done"),
            StatusMessage::Error(message) => write!(f, "Error: {}", message),
            StatusMessage::RequestFailed(detail) => write!(f, "Request failed: {}", detail),
        }
    }
}

/// Button label for the given busy state.
pub fn button_label(busy: bool) -> &'static str {
    if busy {
        BUSY_LABEL
    } else {
        IDLE_LABEL
    }
}
