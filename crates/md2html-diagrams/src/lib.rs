//! Mermaid diagram rendering via mermaid-cli.
//!
//! This crate turns fenced ```` ```mermaid ```` blocks into inline SVG:
//! - [`MermaidCli::locate`] resolves the `mmdc` executable (startup preflight)
//! - [`extract_diagrams`] renders every block and swaps it for a placeholder token
//! - [`DiagramReplacements::apply`] substitutes the rendered SVG into the
//!   converted HTML in a single pass
//!
//! Extraction runs on markdown text before it is converted, so diagrams never
//! pass through the markdown engine.
//!
//! # Example
//!
//! ```no_run
//! use md2html_diagrams::{MermaidCli, extract_diagrams};
//!
//! let cli = MermaidCli::locate("mmdc")?;
//! let (markdown, replacements) = extract_diagrams("```mermaid\ngraph TD\n```", &cli);
//! let mut html = format!("<p>{markdown}</p>");
//! replacements.apply(&mut html);
//! # Ok::<(), md2html_diagrams::DiagramError>(())
//! ```

mod consts;
mod error;
mod extract;
mod mermaid;
mod replacements;

pub use consts::{
    DEFAULT_BACKGROUND, DEFAULT_TIMEOUT, DIAGRAM_CLASS, PLACEHOLDER_PREFIX,
    PLACEHOLDER_SUFFIX,
};
pub use error::DiagramError;
pub use extract::{ExtractedDiagram, extract_diagrams, find_diagrams};
pub use mermaid::{DiagramRenderer, MermaidCli};
pub use replacements::{DiagramReplacements, placeholder};
