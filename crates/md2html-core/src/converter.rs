//! Markdown to standalone HTML conversion pipeline.

use std::path::{Path, PathBuf};

use md2html_diagrams::{DiagramRenderer, extract_diagrams};
use md2html_renderer::{HtmlBackend, MarkdownRenderer};

use crate::document::Document;
use crate::error::ConvertError;
use crate::template::render_page;

/// Complete HTML page rendered from a document.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    /// Full HTML page.
    pub html: String,
    /// Number of mermaid blocks found.
    pub diagrams: usize,
    /// Number of mermaid blocks rendered as error markers.
    pub failed_diagrams: usize,
}

/// Result of converting a file.
#[derive(Clone, Debug)]
pub struct ConvertReport {
    /// Path of the written HTML file.
    pub output_path: PathBuf,
    /// Number of mermaid blocks found.
    pub diagrams: usize,
    /// Number of mermaid blocks rendered as error markers.
    pub failed_diagrams: usize,
}

/// Markdown to HTML converter.
///
/// Pipeline: strip frontmatter, render mermaid blocks, convert markdown,
/// substitute diagrams, wrap in the page template.
#[derive(Debug)]
pub struct MarkdownConverter<R> {
    renderer: R,
}

impl<R: DiagramRenderer> MarkdownConverter<R> {
    /// Create a converter that renders diagrams with `renderer`.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Render a document into a full HTML page.
    pub fn render(&self, document: &Document) -> RenderedDocument {
        let (markdown, replacements) = extract_diagrams(document.body(), &self.renderer);

        let mut html = MarkdownRenderer::<HtmlBackend>::new().render_markdown(&markdown);

        let replaced = replacements.apply(&mut html);
        if replaced != replacements.len() {
            tracing::warn!(
                expected = replacements.len(),
                replaced,
                "Diagram placeholder count mismatch"
            );
        }

        RenderedDocument {
            html: render_page(&html),
            diagrams: replacements.len(),
            failed_diagrams: replacements.failed(),
        }
    }

    /// Convert the markdown file at `input` into `<output_dir>/<stem>.html`.
    ///
    /// The output directory is created if missing.
    pub fn convert_file(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<ConvertReport, ConvertError> {
        let document = Document::read(input)?;
        let output_path = output_dir.join(document.output_file_name()?);
        tracing::debug!(input = %input.display(), output = %output_path.display(), "Converting");

        let rendered = self.render(&document);

        std::fs::create_dir_all(output_dir).map_err(|source| ConvertError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;
        std::fs::write(&output_path, &rendered.html).map_err(|source| ConvertError::Write {
            path: output_path.clone(),
            source,
        })?;

        Ok(ConvertReport {
            output_path,
            diagrams: rendered.diagrams,
            failed_diagrams: rendered.failed_diagrams,
        })
    }
}
