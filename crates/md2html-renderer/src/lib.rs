//! Trait-based markdown renderer with syntax highlighting.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces HTML
//! fragments through the [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! Shared functionality (tables, lists, inline formatting, line breaks) is
//! handled by the generic renderer, while format-specific elements (code
//! blocks, blockquotes, images) are delegated to the backend:
//! - [`HtmlBackend`]: HTML5 output, code blocks highlighted with `syntect`
//!   under the [`HIGHLIGHT_CLASS`] wrapper
//!
//! # Example
//!
//! ```
//! use md2html_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let html = MarkdownRenderer::<HtmlBackend>::new().render_markdown("# Hello\n\n**Bold** text");
//! assert_eq!(html, "<h1>Hello</h1><p><strong>Bold</strong> text</p>");
//! ```

mod backend;
mod highlight;
mod html;
mod renderer;
mod state;

pub use backend::RenderBackend;
pub use highlight::{HIGHLIGHT_CLASS, highlight_code_block};
pub use html::HtmlBackend;
pub use renderer::MarkdownRenderer;
pub use state::escape_html;
