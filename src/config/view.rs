//! Output configuration

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Treatment of server-supplied text in HTML output
    #[serde(default)]
    pub markup: MarkupPolicy,

    /// File the HTML page is written to; stdout when unset
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format '{}', expected text or html", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

/// How server-supplied text is inserted into markup
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkupPolicy {
    /// Escape `& < > " '`
    #[default]
    Escape,
    /// Insert as-is. Server text can inject markup.
    Raw,
}
