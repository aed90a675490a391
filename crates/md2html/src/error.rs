//! CLI error types.

use md2html_config::ConfigError;
use md2html_core::ConvertError;
use md2html_diagrams::DiagramError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Diagram(#[from] DiagramError),

    #[error("{0}")]
    Convert(#[from] ConvertError),
}

impl CliError {
    /// Message printed before exiting.
    ///
    /// A missing renderer prints the install hint on its own.
    pub(crate) fn message(&self) -> String {
        match self {
            Self::Diagram(DiagramError::NotFound { .. }) => self.to_string(),
            _ => format!("Error: {self}"),
        }
    }
}
