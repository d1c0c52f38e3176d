//! Analysis domain - response model and rendering rules.
//!
//! Pure types and functions with no I/O:
//!
//! - `response` - decoded `/analyze` payload (`AnalysisResponse`, `AnalysisResult`)
//! - `result_set` - wire-ordered mapping of pair to result
//! - `block` - the per-pair display block and number formatting
//! - `status` - status line messages and button labels

mod block;
mod response;
mod result_set;
mod status;

pub use block::{format_candle, format_number, ResultBlock, NOT_AVAILABLE};
pub use response::{AnalysisResponse, AnalysisResult, LastCandle, SUCCESS_STATUS};
pub use result_set::ResultSet;
pub use status::{button_label, StatusMessage, BUSY_LABEL, IDLE_LABEL, UNKNOWN_ERROR};
