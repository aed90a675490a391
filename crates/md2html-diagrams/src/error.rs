//! Diagram rendering errors.

use std::process::ExitStatus;
use std::time::Duration;

/// Error returned when a diagram cannot be rendered.
///
/// The [`Display`](std::fmt::Display) text is what ends up inside the inline
/// error fragment, so `Timeout` renders as the bare word `timeout`.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// The renderer executable is not resolvable.
    #[error(
        "mermaid-cli not found. Please install it using: npm install -g @mermaid-js/mermaid-cli"
    )]
    NotFound {
        /// Command name or path that was looked up.
        command: String,
    },

    /// Temp file handling, spawning, or reading the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The renderer did not finish in time and was killed.
    #[error("timeout")]
    Timeout(Duration),

    /// The renderer exited unsuccessfully.
    #[error("mermaid-cli {status}: {stderr}")]
    Failed {
        /// Exit status of the process.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}
