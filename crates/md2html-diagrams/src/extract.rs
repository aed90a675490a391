//! Mermaid block extraction and substitution.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::mermaid::DiagramRenderer;
use crate::replacements::{DiagramReplacements, placeholder};

/// A fenced mermaid block ends at the nearest closing fence.
static MERMAID_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```mermaid\n(.*?)\n```").expect("valid regex"));

/// A mermaid block found in markdown text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDiagram {
    /// Diagram source between the fences.
    pub source: String,
    /// Zero-based index in order of appearance.
    pub index: usize,
    /// Byte range of the whole fenced block in the scanned text.
    pub span: Range<usize>,
}

/// Find every mermaid block in `text`, in order of appearance.
#[must_use]
pub fn find_diagrams(text: &str) -> Vec<ExtractedDiagram> {
    MERMAID_BLOCK
        .captures_iter(text)
        .enumerate()
        .filter_map(|(index, caps)| {
            let block = caps.get(0)?;
            let source = caps.get(1)?;
            Some(ExtractedDiagram {
                source: source.as_str().to_owned(),
                index,
                span: block.range(),
            })
        })
        .collect()
}

/// Render every mermaid block and replace it with its placeholder token.
///
/// Diagrams are rendered one at a time in document order. A failed render is
/// logged and recorded as an inline error marker; extraction never fails.
///
/// Returns the rewritten text and the placeholder map to resolve after the
/// markdown has been converted.
pub fn extract_diagrams<R>(text: &str, renderer: &R) -> (String, DiagramReplacements)
where
    R: DiagramRenderer + ?Sized,
{
    let diagrams = find_diagrams(text);
    let mut replacements = DiagramReplacements::with_capacity(diagrams.len());
    if diagrams.is_empty() {
        return (text.to_owned(), replacements);
    }

    tracing::debug!(count = diagrams.len(), "Found mermaid diagrams");

    let mut rewritten = String::with_capacity(text.len());
    let mut last_end = 0;
    for diagram in diagrams {
        match renderer.render(&diagram.source) {
            Ok(svg) => replacements.add(diagram.index, svg),
            Err(e) => {
                tracing::warn!(index = diagram.index, error = %e, "Failed to render diagram");
                replacements.add_error(diagram.index, &e);
            }
        }
        rewritten.push_str(&text[last_end..diagram.span.start]);
        rewritten.push_str(&placeholder(diagram.index));
        last_end = diagram.span.end;
    }
    rewritten.push_str(&text[last_end..]);

    (rewritten, replacements)
}
