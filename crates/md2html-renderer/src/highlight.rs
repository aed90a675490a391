//! Syntax highlighting for fenced code blocks.
//!
//! Code is tokenised with syntect and emitted as `<span>` elements carrying
//! scope class names, so colours come from the page stylesheet rather than
//! inline styles. Every block is wrapped in a container with the
//! [`HIGHLIGHT_CLASS`] class.

use std::fmt::Write;
use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::state::escape_html;

/// CSS class of the element wrapping every highlighted block.
pub const HIGHLIGHT_CLASS: &str = "highlight";

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Look up the grammar for a fence language token (e.g. `rust`, `py`, `sh`).
fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    SYNTAX_SET.find_syntax_by_token(language)
}

/// Tokenise `code` into classed HTML spans.
///
/// Returns `None` when syntect fails on the input, so the caller can fall back
/// to plain escaped text.
fn classed_html(syntax: &SyntaxReference, code: &str) -> Option<String> {
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::debug!(syntax = %syntax.name, error = %err, "Highlighting failed");
            return None;
        }
    }
    Some(generator.finalize())
}

/// Render a code block as highlighted HTML into `out`.
///
/// Known languages get classed token spans; unknown or missing languages are
/// HTML-escaped verbatim. Both share the same wrapper markup:
///
/// ```text
/// <div class="highlight"><pre><code class="language-LANG">…</code></pre></div>
/// ```
pub fn highlight_code_block(lang: Option<&str>, code: &str, out: &mut String) {
    let body = lang
        .and_then(find_syntax)
        .and_then(|syntax| classed_html(syntax, code))
        .unwrap_or_else(|| escape_html(code));

    write!(out, r#"<div class="{HIGHLIGHT_CLASS}"><pre><code"#).unwrap();
    if let Some(lang) = lang {
        write!(out, r#" class="language-{}""#, escape_html(lang)).unwrap();
    }
    write!(out, ">{body}</code></pre></div>").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn highlight(lang: Option<&str>, code: &str) -> String {
        let mut out = String::new();
        highlight_code_block(lang, code, &mut out);
        out
    }

    #[test]
    fn test_known_language_gets_token_spans() {
        let html = highlight(Some("rust"), "fn main() {}\n");
        assert!(html.starts_with(r#"<div class="highlight"><pre><code class="language-rust">"#));
        assert!(html.ends_with("</code></pre></div>"));
        assert!(html.contains("<span class=\""));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let html = highlight(Some("no-such-lang"), "<b>&</b>\n");
        assert_eq!(
            html,
            "<div class=\"highlight\"><pre><code class=\"language-no-such-lang\">&lt;b&gt;&amp;&lt;/b&gt;\n</code></pre></div>"
        );
    }

    #[test]
    fn test_no_language() {
        let html = highlight(None, "plain text\n");
        assert_eq!(
            html,
            "<div class=\"highlight\"><pre><code>plain text\n</code></pre></div>"
        );
    }

    #[test]
    fn test_highlighted_output_escapes_markup() {
        let html = highlight(Some("python"), "print(\"<tag>\")\n");
        assert!(!html.contains("<tag>"));
        assert!(html.contains("&lt;tag&gt;"));
    }

    #[test]
    fn test_highlighting_is_deterministic() {
        let code = "def f(x):\n    return x * 2\n";
        assert_eq!(highlight(Some("python"), code), highlight(Some("python"), code));
    }
}
