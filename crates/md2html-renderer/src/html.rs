//! HTML backend for markdown rendering.
//!
//! Produces HTML5 output suitable for a standalone page.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::highlight::highlight_code_block;
use crate::state::escape_html;

/// HTML render backend.
///
/// Produces:
/// - `<div class="highlight"><pre><code>` for code blocks, with syntax highlighting
/// - `<blockquote>` for blockquotes
/// - `<img>` for images
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        highlight_code_block(lang, content, out);
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }
}
