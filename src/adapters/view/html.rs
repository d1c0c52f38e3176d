//! HTML View Adapter
//!
//! Maintains a page model (activation button, status region, results
//! container) and renders it as a standalone HTML page using the host
//! page's element ids and class names:
//!
//! - `#analyzeBtn` - activation control, `disabled` while busy
//! - `#status` - status text
//! - `#results` - one `div.box` per pair
//!
//! Status text is always escaped. Server-supplied text inside result boxes
//! follows the configured [`MarkupPolicy`].

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::config::MarkupPolicy;
use crate::domain::analysis::{button_label, ResultBlock, StatusMessage};
use crate::ports::AnalysisView;

#[derive(Debug, Default)]
struct PageState {
    busy: bool,
    status: String,
    boxes: Vec<String>,
}

/// HTML page view.
#[derive(Debug)]
pub struct HtmlView {
    policy: MarkupPolicy,
    page: Mutex<PageState>,
}

impl HtmlView {
    pub fn new(policy: MarkupPolicy) -> Self {
        if policy == MarkupPolicy::Raw {
            warn!("HTML view inserts server text without escaping");
        }
        Self {
            policy,
            page: Mutex::new(PageState::default()),
        }
    }

    pub fn policy(&self) -> MarkupPolicy {
        self.policy
    }

    fn page(&self) -> MutexGuard<'_, PageState> {
        self.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of result boxes currently on the page.
    pub fn box_count(&self) -> usize {
        self.page().boxes.len()
    }

    /// Renders the results container's inner markup.
    pub fn render_results(&self) -> String {
        self.page().boxes.join("\n")
    }

    /// Renders the complete page.
    pub fn render_page(&self) -> String {
        let page = self.page();
        let disabled = if page.busy { " disabled" } else { "" };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n<title>FX Pair Analysis</title>\n");
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!(
            "<button id=\"analyzeBtn\"{}>{}</button>\n",
            disabled,
            button_label(page.busy)
        ));
        html.push_str(&format!(
            "<div id=\"status\">{}</div>\n",
            escape_html(&page.status)
        ));
        html.push_str("<div id=\"results\">\n");
        for b in &page.boxes {
            html.push_str(b);
            html.push('\n');
        }
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    /// Writes the rendered page to `path`.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render_page())
    }
}

impl AnalysisView for HtmlView {
    fn set_status(&self, status: &StatusMessage) {
        self.page().status = status.to_string();
    }

    fn clear_results(&self) {
        self.page().boxes.clear();
    }

    fn add_result_block(&self, block: &ResultBlock) {
        let markup = render_block(block, self.policy);
        self.page().boxes.push(markup);
    }

    fn set_busy(&self, busy: bool) {
        self.page().busy = busy;
    }
}

/// Renders one result box.
pub fn render_block(block: &ResultBlock, policy: MarkupPolicy) -> String {
    let text = |s: &str| match policy {
        MarkupPolicy::Escape => escape_html(s),
        MarkupPolicy::Raw => s.to_string(),
    };

    format!(
        "<div class=\"box\"><h3>{pair}</h3>\n\
         <div class=\"pred {modifier}\">{headline}</div>\n\
         <div class=\"mode\">Mode: {mode}</div>\n\
         <div class=\"prob\">Prob CALL: {prob}</div>\n\
         <div class=\"last\">Last candle: {last}</div>\n\
         <div class=\"reason\">{reason}</div></div>",
        pair = text(&block.pair),
        modifier = text(&block.style_modifier()),
        headline = text(&block.headline()),
        mode = text(&block.mode),
        prob = text(&block.prob_call),
        last = text(&block.last_candle),
        reason = text(&block.reason),
    )
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
