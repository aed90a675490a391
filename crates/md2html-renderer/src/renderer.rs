//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::state::{CodeBlockState, ImageState, TableState, escape_html};

/// Generic markdown renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait to delegate format-specific rendering
/// while handling common elements (tables, lists, inline formatting) generically.
///
/// Fenced code blocks may be nested by using a longer outer fence
/// (e.g. four backticks around a block that itself contains three).
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    /// Code block rendering state.
    code: CodeBlockState,
    /// Table rendering state.
    table: TableState,
    /// Image alt text capture state.
    image: ImageState,
    /// Render single newlines inside paragraphs as line breaks.
    hard_breaks: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer.
    ///
    /// Single newlines are rendered as `<br>` line breaks by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            hard_breaks: true,
            _backend: PhantomData,
        }
    }

    /// Enable or disable rendering single newlines as line breaks.
    ///
    /// When disabled, soft breaks are emitted as plain newlines and the
    /// browser reflows the paragraph.
    #[must_use]
    pub fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.hard_breaks = enabled;
        self
    }

    /// Parser options used by [`render_markdown`](Self::render_markdown).
    ///
    /// Tables, strikethrough, and task lists are enabled.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }

    /// Render markdown text directly using the configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> String {
        self.render(Parser::new_ext(markdown, Self::parser_options()))
    }

    /// Render markdown events and return the HTML fragment.
    pub fn render<'a, I>(&mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        std::mem::take(&mut self.output)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => B::hard_break(&mut self.output),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    /// Push inline markup unless alt text is being captured.
    fn push_inline(&mut self, content: &str) {
        if !self.image.is_active() {
            self.output.push_str(content);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.output, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => fence_language(info),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link_tag = format!(r#"<a href="{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    write!(link_tag, r#" title="{}""#, escape_html(&title)).unwrap();
                }
                link_tag.push('>');
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as nested text events; the tag is written in end_tag
                self.image.start(dest_url.to_string(), title.to_string());
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.output, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                B::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some((src, title, alt)) = self.image.end() {
                    B::image(&src, &alt, &title, &mut self.output);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        // Priority: code > image > normal text
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else if self.hard_breaks {
            B::hard_break(&mut self.output);
            self.output.push('\n');
        } else {
            self.output.push('\n');
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the language token from a fence info string.
///
/// Format: `language [attributes...]`. Returns `None` for an empty info string.
fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_owned)
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlBackend;
    use pretty_assertions::assert_eq;

    fn render_html(markdown: &str) -> String {
        MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
    }

    #[test]
    fn test_html_basic_paragraph() {
        assert_eq!(render_html("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_html_heading() {
        let html = render_html("# Test Heading\nThis is a test.");
        assert_eq!(html, "<h1>Test Heading</h1><p>This is a test.</p>");
    }

    #[test]
    fn test_all_heading_levels() {
        let html = render_html("## Two\n\n###### Six");
        assert_eq!(html, "<h2>Two</h2><h6>Six</h6>");
    }

    #[test]
    fn test_html_table() {
        let markdown = "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |\n";
        let html = render_html(markdown);
        assert_eq!(
            html,
            "<table><thead><tr><th>Header 1</th><th>Header 2</th></tr></thead>\
             <tbody><tr><td>Cell 1</td><td>Cell 2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_table_alignment() {
        let html = render_html("| L | R |\n|:--|--:|\n| a | b |");
        assert!(html.contains(r#"<th style="text-align:left">L</th>"#));
        assert!(html.contains(r#"<td style="text-align:right">b</td>"#));
    }

    #[test]
    fn test_single_newline_is_line_break() {
        let html = render_html("first line\nsecond line");
        assert_eq!(html, "<p>first line<br>\nsecond line</p>");
    }

    #[test]
    fn test_soft_breaks_without_hard_breaks() {
        let html = MarkdownRenderer::<HtmlBackend>::new()
            .with_hard_breaks(false)
            .render_markdown("first line\nsecond line");
        assert_eq!(html, "<p>first line\nsecond line</p>");
    }

    #[test]
    fn test_fenced_code_block_is_highlighted() {
        let html = render_html("```rust\nfn main() {}\n```");
        assert!(html.starts_with(r#"<div class="highlight"><pre><code class="language-rust">"#));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_fence_info_attributes_ignored() {
        let html = render_html("```text title=example\nhello\n```");
        assert!(html.contains(r#"class="language-text""#));
        assert!(!html.contains("title=example"));
    }

    #[test]
    fn test_indented_code_block() {
        let html = render_html("    indented code\n");
        assert_eq!(
            html,
            "<div class=\"highlight\"><pre><code>indented code\n</code></pre></div>"
        );
    }

    #[test]
    fn test_nested_fences() {
        let markdown = "````\n```python\nprint(1)\n```\n````";
        let html = render_html(markdown);
        assert!(html.contains("```python\nprint(1)\n```"));
        assert_eq!(html.matches("<pre>").count(), 1);
    }

    #[test]
    fn test_placeholder_text_passes_through() {
        let html = render_html("Intro\n\n{{MERMAID_DIAGRAM_0}}\n\nOutro");
        assert_eq!(html, "<p>Intro</p><p>{{MERMAID_DIAGRAM_0}}</p><p>Outro</p>");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(render_html("> Note"), "<blockquote><p>Note</p></blockquote>");
    }

    #[test]
    fn test_image() {
        assert_eq!(
            render_html("![Alt *text*](image.png)"),
            r#"<p><img src="image.png" alt="Alt text"></p>"#
        );
    }

    #[test]
    fn test_link_with_title() {
        assert_eq!(
            render_html(r#"[docs](https://example.com "Docs")"#),
            r#"<p><a href="https://example.com" title="Docs">docs</a></p>"#
        );
    }

    #[test]
    fn test_emphasis_and_strikethrough() {
        assert_eq!(
            render_html("*em* **strong** ~~gone~~ `code`"),
            "<p><em>em</em> <strong>strong</strong> <del>gone</del> <code>code</code></p>"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(render_html("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(render_html("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
        assert_eq!(render_html("3. c\n4. d"), r#"<ol start="3"><li>c</li><li>d</li></ol>"#);
    }

    #[test]
    fn test_task_list() {
        let html = render_html("- [x] done\n- [ ] todo");
        assert!(html.contains(r#"<input type="checkbox" checked disabled> done"#));
        assert!(html.contains(r#"<input type="checkbox" disabled> todo"#));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(render_html("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert!(render_html("<div>raw</div>").starts_with("<div>raw</div>"));
    }

    #[test]
    fn test_renderer_is_reusable() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::default();
        assert_eq!(renderer.render_markdown("one"), "<p>one</p>");
        assert_eq!(renderer.render_markdown("two"), "<p>two</p>");
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("rust"), Some("rust".to_owned()));
        assert_eq!(fence_language("python title=x"), Some("python".to_owned()));
        assert_eq!(fence_language("   "), None);
        assert_eq!(fence_language(""), None);
    }
}
