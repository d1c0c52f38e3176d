//! Display block for one analysed pair.
//!
//! A [`ResultBlock`] is the rendered form of an [`AnalysisResult`]: every
//! fallback has been applied and every number formatted. Output adapters
//! only lay the fields out; they make no presentation decisions of their own.

use serde::Serialize;

use super::response::{AnalysisResult, LastCandle};

/// Label shown when the server sent no prediction or no last candle.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered view of a single pair's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultBlock {
    /// Pair identifier, used as the block heading.
    pub pair: String,
    /// Uppercased prediction, `N/A` when absent.
    pub prediction: String,
    /// Confidence with a `%` suffix, or `None` when the server sent none.
    pub confidence: Option<String>,
    pub mode: String,
    /// Call probability, empty when absent.
    pub prob_call: String,
    /// `O:.. H:.. L:.. C:..` summary or `N/A`.
    pub last_candle: String,
    /// Free text from the server, unescaped.
    pub reason: String,
}

impl ResultBlock {
    /// Applies the rendering rule to one result entry.
    pub fn from_result(pair: &str, result: &AnalysisResult) -> Self {
        let prediction = result
            .prediction
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_uppercase();

        Self {
            pair: pair.to_string(),
            prediction,
            confidence: result.confidence.map(|c| format!("{}%", format_number(c))),
            mode: result.mode.clone().unwrap_or_default(),
            prob_call: result.prob_call.map(format_number).unwrap_or_default(),
            last_candle: result
                .last_candle
                .as_ref()
                .map(format_candle)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            reason: result.reason.clone().unwrap_or_default(),
        }
    }

    /// Lowercase prediction, used as a style modifier (`call`, `put`, ...).
    pub fn style_modifier(&self) -> String {
        self.prediction.to_lowercase()
    }

    /// Prediction label with the confidence suffix, e.g. `CALL 87%`.
    pub fn headline(&self) -> String {
        match &self.confidence {
            Some(confidence) => format!("{} {}", self.prediction, confidence),
            None => self.prediction.clone(),
        }
    }
}

/// Formats a candle as `O:<o> H:<h> L:<l> C:<c>`.
pub fn format_candle(candle: &LastCandle) -> String {
    format!(
        "O:{} H:{} L:{} C:{}",
        format_number(candle.o),
        format_number(candle.h),
        format_number(candle.l),
        format_number(candle.c)
    )
}

/// Shortest round-trip form of a number, without a trailing `.0`.
///
/// Magnitudes below `1e-6` or from `1e21` up switch to exponent notation
/// (`1e-7`, `1.5e+21`), the way the host page printed them.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // collapses -0
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    format!("{}", value)
}
