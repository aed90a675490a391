//! Input document loading.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::ConvertError;
use crate::frontmatter::strip_frontmatter;

/// A markdown document with its frontmatter removed.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    body: String,
    metadata: Option<Value>,
}

impl Document {
    /// Read and split the document at `path`.
    ///
    /// CRLF line endings are normalised to LF.
    pub fn read(path: &Path) -> Result<Self, ConvertError> {
        if !path.is_file() {
            return Err(ConvertError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(path, &text))
    }

    /// Build a document from text already in memory.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let stripped = if text.contains('\r') {
            strip_frontmatter(&text.replace("\r\n", "\n"))
        } else {
            strip_frontmatter(text)
        };
        Self {
            path: path.into(),
            body: stripped.body,
            metadata: stripped.metadata,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Markdown body without frontmatter.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parsed frontmatter metadata.
    #[must_use]
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Output file name: the input stem with an `.html` extension.
    pub fn output_file_name(&self) -> Result<String, ConvertError> {
        let stem = self
            .path
            .file_stem()
            .ok_or_else(|| ConvertError::InvalidPath(self.path.clone()))?;
        Ok(format!("{}.html", stem.to_string_lossy()))
    }
}
