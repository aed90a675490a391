//! Render backend trait for format-specific rendering.
//!
//! The generic renderer handles paragraphs, lists, tables, and inline
//! formatting. Elements whose markup depends on the output target are
//! delegated to a backend.

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// Render a fenced or indented code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier from the fence (e.g., "rust")
    /// * `content` - The raw code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a hard break.
    ///
    /// Default uses `<br>`.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    ///
    /// Default uses `<hr>`.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
