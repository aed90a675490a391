//! Conversion command implementation.

use std::path::PathBuf;

use clap::Args;
use md2html_config::{CliSettings, Config};
use md2html_core::MarkdownConverter;
use md2html_diagrams::MermaidCli;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for converting a markdown file.
#[derive(Args, Debug)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert.
    pub input_file: PathBuf,

    /// Directory for the generated HTML file (default: output).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover md2html.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Mermaid CLI executable name or path (overrides config).
    #[arg(long, env = "MD2HTML_MMDC")]
    pub mmdc: Option<String>,

    /// Per-diagram render timeout in seconds (overrides config).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose output (diagram timings and pipeline progress).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the conversion.
    ///
    /// The renderer executable is resolved before the input is read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            mmdc_command: self.mmdc,
            timeout_secs: self.timeout,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let cli = MermaidCli::locate(&config.diagrams.command)?
            .with_timeout(config.diagrams.timeout())
            .with_background(config.diagrams.background.as_str())
            .with_temp_dir(config.diagrams.temp_dir.clone());

        let report =
            MarkdownConverter::new(cli).convert_file(&self.input_file, &config.output_dir)?;

        tracing::info!(
            diagrams = report.diagrams,
            failed = report.failed_diagrams,
            "Conversion finished"
        );
        if report.failed_diagrams > 0 {
            output.warning(&format!(
                "{} of {} diagrams failed to render",
                report.failed_diagrams, report.diagrams
            ));
        }
        output.success(&format!(
            "Successfully converted file to: {}",
            report.output_path.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md2html_diagrams::DiagramError;

    #[test]
    fn test_missing_renderer_stops_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let input_file = dir.path().join("doc.md");
        std::fs::write(&input_file, "# Doc").unwrap();
        let output_dir = dir.path().join("out");

        let args = ConvertArgs {
            input_file,
            output_dir: Some(output_dir.clone()),
            config: None,
            mmdc: Some("md2html-nonexistent-renderer".to_owned()),
            timeout: None,
            verbose: false,
        };

        let err = args.execute().unwrap_err();

        assert!(matches!(
            err,
            CliError::Diagram(DiagramError::NotFound { .. })
        ));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_missing_renderer_checked_before_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConvertArgs {
            input_file: dir.path().join("missing.md"),
            output_dir: Some(dir.path().join("out")),
            config: None,
            mmdc: Some("md2html-nonexistent-renderer".to_owned()),
            timeout: None,
            verbose: false,
        };

        assert!(matches!(
            args.execute(),
            Err(CliError::Diagram(DiagramError::NotFound { .. }))
        ));
    }
}
