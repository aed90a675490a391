//! Markdown to standalone HTML conversion.
//!
//! Converts one markdown file into one self-contained HTML page:
//! - [`Document`]: input loading with frontmatter stripping
//! - [`MarkdownConverter`]: the conversion pipeline, with mermaid diagrams
//!   rendered through any [`DiagramRenderer`](md2html_diagrams::DiagramRenderer)
//! - [`render_page`]: page template with the embedded stylesheet
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use md2html_core::MarkdownConverter;
//! use md2html_diagrams::MermaidCli;
//!
//! let cli = MermaidCli::locate("mmdc")?;
//! let report = MarkdownConverter::new(cli).convert_file(Path::new("README.md"), Path::new("output"))?;
//! println!("{}", report.output_path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod converter;
mod document;
mod error;
mod frontmatter;
mod template;

pub use converter::{ConvertReport, MarkdownConverter, RenderedDocument};
pub use document::Document;
pub use error::ConvertError;
pub use frontmatter::{Stripped, strip_frontmatter};
pub use template::render_page;
