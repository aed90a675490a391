//! Placeholder map and single-pass placeholder resolution.

use std::collections::HashMap;
use std::fmt::Write;

use md2html_renderer::escape_html;

use crate::consts::{DIAGRAM_CLASS, PLACEHOLDER_PREFIX, PLACEHOLDER_SUFFIX};
use crate::error::DiagramError;

/// Build the placeholder token for diagram `index`.
///
/// The closing delimiter keeps `{{MERMAID_DIAGRAM_1}}` from matching the
/// start of `{{MERMAID_DIAGRAM_10}}`.
#[must_use]
pub fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{index}{PLACEHOLDER_SUFFIX}")
}

/// Rendered markup for each diagram placeholder, keyed by diagram index.
#[derive(Debug, Default)]
pub struct DiagramReplacements {
    map: HashMap<usize, String>,
    failed: usize,
}

impl DiagramReplacements {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            failed: 0,
        }
    }

    /// Add rendered markup for a diagram placeholder.
    pub fn add(&mut self, index: usize, content: String) {
        self.map.insert(index, content);
    }

    /// Add an inline error marker for a diagram that failed to render.
    pub fn add_error(&mut self, index: usize, error: &DiagramError) {
        let fragment = format!(
            r#"<div class="error">Error generating diagram: {}</div>"#,
            escape_html(&error.to_string())
        );
        self.failed += 1;
        self.add(index, fragment);
    }

    /// Number of recorded placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of placeholders holding an error marker.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Markup recorded for diagram `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.map.get(&index).map(String::as_str)
    }

    /// Replace every recorded placeholder in `html` in a single pass.
    ///
    /// Each token becomes `<div class="mermaid-diagram">…</div>`. A token that
    /// is the only content of a paragraph takes the `<p>`/`</p>` pair with it.
    /// Inserted markup is never rescanned and unknown tokens are kept verbatim.
    ///
    /// Returns the number of tokens substituted.
    pub fn apply(&self, html: &mut String) -> usize {
        if self.map.is_empty() {
            return 0;
        }

        let extra: usize = self.map.values().map(String::len).sum();
        let mut result = String::with_capacity(html.len() + extra);
        let mut remaining = html.as_str();
        let mut replaced = 0;

        while let Some(start) = remaining.find(PLACEHOLDER_PREFIX) {
            let after_prefix = &remaining[start + PLACEHOLDER_PREFIX.len()..];
            let Some(end_pos) = after_prefix.find(PLACEHOLDER_SUFFIX) else {
                break;
            };
            let token_end = start + PLACEHOLDER_PREFIX.len() + end_pos + PLACEHOLDER_SUFFIX.len();

            let content = after_prefix[..end_pos]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.map.get(&index));
            let Some(content) = content else {
                // Not ours, keep original text
                result.push_str(&remaining[..token_end]);
                remaining = &remaining[token_end..];
                continue;
            };

            let mut before = &remaining[..start];
            let mut after = &remaining[token_end..];
            if let (Some(b), Some(a)) = (before.strip_suffix("<p>"), after.strip_prefix("</p>")) {
                before = b;
                after = a;
            }

            result.push_str(before);
            write!(result, r#"<div class="{DIAGRAM_CLASS}">{content}</div>"#).unwrap();
            replaced += 1;
            remaining = after;
        }

        result.push_str(remaining);
        *html = result;
        replaced
    }
}
