//! Conversion errors.

use std::path::PathBuf;

/// Fatal error while converting a document.
///
/// Per-diagram failures are not represented here; they are rendered inline.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file exists but could not be read as UTF-8 text.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory or file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input path has no file name to derive the output name from.
    #[error("Invalid input path: {}", .0.display())]
    InvalidPath(PathBuf),
}
