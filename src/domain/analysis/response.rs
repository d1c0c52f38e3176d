//! Wire model for the `/analyze` response.
//!
//! The server speaks loosely-typed JSON. Decoding goes through a raw shape
//! and is then folded into the [`AnalysisResponse`] sum type, so that the
//! success/failure decision is made once, here, and not re-checked during
//! rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::result_set::{self, ResultSet};

/// The status value the server uses to signal success.
pub const SUCCESS_STATUS: &str = "ok";

/// Most recent candle the server based its prediction on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastCandle {
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    /// Candle timestamp as sent by the data provider. Not rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,
}

impl LastCandle {
    pub fn new(o: f64, h: f64, l: f64, c: f64) -> Self {
        Self { o, h, l, c, t: None }
    }
}

/// Prediction for a single instrument pair.
///
/// Every field is optional; the renderer substitutes display fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_candle: Option<LastCandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob_call: Option<f64>,
    /// Pair identifier echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    /// Per-pair outcome ("ok" or "error"). A pair can fail while the
    /// overall response still succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl AnalysisResult {
    /// Returns true when the server reported this pair as failed.
    pub fn is_pair_error(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s != SUCCESS_STATUS)
    }
}

/// Decoded `/analyze` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAnalysisResponse", into = "RawAnalysisResponse")]
pub enum AnalysisResponse {
    /// Status was the success sentinel.
    Ok { results: ResultSet },
    /// Any other status, including a missing one.
    Failed {
        status: Option<String>,
        error: Option<String>,
        trace: Option<String>,
    },
}

impl AnalysisResponse {
    /// Successful response carrying `results`.
    pub fn ok(results: ResultSet) -> Self {
        AnalysisResponse::Ok { results }
    }

    /// Failed response with a server-supplied message.
    pub fn error(message: impl Into<String>) -> Self {
        AnalysisResponse::Failed {
            status: Some("error".to_string()),
            error: Some(message.into()),
            trace: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AnalysisResponse::Ok { .. })
    }
}

/// JSON shape as sent over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawAnalysisResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<Value>,
    #[serde(
        default,
        deserialize_with = "result_set::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    results: Option<ResultSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl From<RawAnalysisResponse> for AnalysisResponse {
    fn from(raw: RawAnalysisResponse) -> Self {
        match raw.status {
            Some(Value::String(ref s)) if s == SUCCESS_STATUS => AnalysisResponse::Ok {
                results: raw.results.unwrap_or_default(),
            },
            status => AnalysisResponse::Failed {
                status: status.map(|v| match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                }),
                error: raw.error.and_then(error_text),
                trace: raw.trace,
            },
        }
    }
}

impl From<AnalysisResponse> for RawAnalysisResponse {
    fn from(response: AnalysisResponse) -> Self {
        match response {
            AnalysisResponse::Ok { results } => RawAnalysisResponse {
                status: Some(Value::String(SUCCESS_STATUS.to_string())),
                results: Some(results),
                ..Default::default()
            },
            AnalysisResponse::Failed {
                status,
                error,
                trace,
            } => RawAnalysisResponse {
                status: status.map(Value::String),
                results: None,
                error: error.map(Value::String),
                trace,
            },
        }
    }
}

/// Falsy error values (`null`, `""`, `false`, `0`) count as absent.
fn error_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> AnalysisResponse {
        serde_json::from_str(json).expect("valid response json")
    }

    #[test]
    fn decodes_success_with_full_result() {
        let response = decode(
            r#"{"status":"ok","results":{"EURUSD":{"prediction":"call","confidence":87,"mode":"auto","reason":"trend up","last_candle":{"o":1.1,"h":1.2,"l":1.05,"c":1.18},"prob_call":0.72}}}"#,
        );

        let AnalysisResponse::Ok { results } = response else {
            panic!("expected success");
        };
        let result = results.get("EURUSD").unwrap();
        assert_eq!(result.prediction.as_deref(), Some("call"));
        assert_eq!(result.confidence, Some(87.0));
        assert_eq!(result.prob_call, Some(0.72));
        assert_eq!(result.last_candle, Some(LastCandle::new(1.1, 1.2, 1.05, 1.18)));
    }

    #[test]
    fn null_fields_decode_as_absent() {
        let response = decode(
            r#"{"status":"ok","results":{"X":{"prediction":null,"confidence":null,"prob_call":null,"last_candle":null}}}"#,
        );
        let AnalysisResponse::Ok { results } = response else {
            panic!("expected success");
        };
        assert_eq!(results.get("X"), Some(&AnalysisResult::default()));
    }

    #[test]
    fn success_without_results_is_empty() {
        assert_eq!(decode(r#"{"status":"ok"}"#), AnalysisResponse::ok(ResultSet::new()));
        assert_eq!(
            decode(r#"{"status":"ok","results":null}"#),
            AnalysisResponse::ok(ResultSet::new())
        );
    }

    #[test]
    fn falsy_results_are_empty() {
        for results in ["false", "0", "\"\""] {
            let json = format!(r#"{{"status":"ok","results":{}}}"#, results);
            assert_eq!(
                decode(&json),
                AnalysisResponse::ok(ResultSet::new()),
                "results = {}",
                results
            );
        }
    }

    #[test]
    fn non_object_results_are_empty() {
        for results in ["[]", "[1,2]", "true", "7", "\"EURUSD\""] {
            let json = format!(r#"{{"status":"ok","results":{}}}"#, results);
            assert_eq!(
                decode(&json),
                AnalysisResponse::ok(ResultSet::new()),
                "results = {}",
                results
            );
        }
    }

    #[test]
    fn malformed_result_entry_still_fails() {
        let json = r#"{"status":"ok","results":{"EURUSD":{"confidence":"high"}}}"#;
        assert!(serde_json::from_str::<AnalysisResponse>(json).is_err());
    }

    #[test]
    fn decodes_failure_with_message() {
        let response = decode(r#"{"status":"error","error":"model unavailable"}"#);
        assert_eq!(
            response,
            AnalysisResponse::Failed {
                status: Some("error".into()),
                error: Some("model unavailable".into()),
                trace: None,
            }
        );
    }

    #[test]
    fn failure_without_message_has_no_error() {
        let AnalysisResponse::Failed { error, .. } = decode(r#"{"status":"error"}"#) else {
            panic!("expected failure");
        };
        assert_eq!(error, None);
    }

    #[test]
    fn empty_error_string_counts_as_absent() {
        let AnalysisResponse::Failed { error, .. } =
            decode(r#"{"status":"error","error":""}"#)
        else {
            panic!("expected failure");
        };
        assert_eq!(error, None);
    }

    #[test]
    fn non_string_error_is_rendered_as_json() {
        let AnalysisResponse::Failed { error, .. } =
            decode(r#"{"status":"error","error":{"code":7}}"#)
        else {
            panic!("expected failure");
        };
        assert_eq!(error.as_deref(), Some(r#"{"code":7}"#));
    }

    #[test]
    fn missing_status_is_failure() {
        let response = decode(r#"{"results":{}}"#);
        assert!(!response.is_ok());
    }

    #[test]
    fn status_match_is_exact() {
        assert!(!decode(r#"{"status":"OK"}"#).is_ok());
        assert!(!decode(r#"{"status":true}"#).is_ok());
    }

    #[test]
    fn keeps_server_trace() {
        let AnalysisResponse::Failed { trace, .. } =
            decode(r#"{"status":"error","error":"boom","trace":"Traceback..."}"#)
        else {
            panic!("expected failure");
        };
        assert_eq!(trace.as_deref(), Some("Traceback..."));
    }

    #[test]
    fn per_pair_error_is_detected() {
        let result = AnalysisResult {
            status: Some("error".into()),
            ..Default::default()
        };
        assert!(result.is_pair_error());
        assert!(!AnalysisResult::default().is_pair_error());
    }

    #[test]
    fn non_object_body_fails_to_decode() {
        assert!(serde_json::from_str::<AnalysisResponse>("null").is_err());
        assert!(serde_json::from_str::<AnalysisResponse>("\"ok\"").is_err());
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let json = serde_json::to_value(AnalysisResponse::error("down")).unwrap();
        assert_eq!(json, serde_json::json!({"status":"error","error":"down"}));
    }
}
