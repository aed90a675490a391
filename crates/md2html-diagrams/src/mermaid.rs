//! Mermaid diagram rendering through the `mmdc` command-line tool.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;

use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_TIMEOUT, POLL_INTERVAL};
use crate::error::DiagramError;

/// Renders one diagram source into SVG markup.
///
/// Implemented by [`MermaidCli`]; the extractor only depends on this trait.
pub trait DiagramRenderer {
    /// Render `source` and return the SVG markup.
    fn render(&self, source: &str) -> Result<String, DiagramError>;
}

/// Resolved mermaid-cli executable with invocation settings.
///
/// Each [`render`](DiagramRenderer::render) call runs
/// `<program> -i <input.mmd> -o <output.svg> -b <background>` with fresh
/// temporary files, which are removed when the call returns.
#[derive(Debug, Clone)]
pub struct MermaidCli {
    program: PathBuf,
    timeout: Duration,
    background: String,
    temp_dir: Option<PathBuf>,
}

impl MermaidCli {
    /// Resolve `command` on `PATH` (or as a path to an executable).
    ///
    /// This is the startup preflight: callers run it before reading any input.
    pub fn locate(command: &str) -> Result<Self, DiagramError> {
        let program = which::which(command).map_err(|e| {
            tracing::debug!(command, error = %e, "Renderer executable not resolvable");
            DiagramError::NotFound {
                command: command.to_owned(),
            }
        })?;
        tracing::debug!(program = %program.display(), "Located mermaid-cli");
        Ok(Self {
            program,
            timeout: DEFAULT_TIMEOUT,
            background: DEFAULT_BACKGROUND.to_owned(),
            temp_dir: None,
        })
    }

    /// Set the per-diagram timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the background colour passed to `-b`.
    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Create temporary files in `dir` instead of the system temp directory.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.temp_dir = dir;
        self
    }

    /// Resolved executable path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Per-diagram timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn named_temp_file(&self, suffix: &str) -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("md2html-").suffix(suffix);
        match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

impl DiagramRenderer for MermaidCli {
    fn render(&self, source: &str) -> Result<String, DiagramError> {
        let started = Instant::now();

        let mut input = self.named_temp_file(".mmd")?;
        input.write_all(source.as_bytes())?;
        input.flush()?;
        let output = self.named_temp_file(".svg")?;

        // Stderr goes to an anonymous file so a chatty child never blocks on a full pipe
        let mut stderr_sink = match &self.temp_dir {
            Some(dir) => tempfile::tempfile_in(dir)?,
            None => tempfile::tempfile()?,
        };

        let mut child = Command::new(&self.program)
            .arg("-i")
            .arg(input.path())
            .arg("-o")
            .arg(output.path())
            .arg("-b")
            .arg(&self.background)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_sink.try_clone()?))
            .spawn()?;

        let Some(status) = wait_with_timeout(&mut child, self.timeout)? else {
            return Err(DiagramError::Timeout(self.timeout));
        };

        if !status.success() {
            return Err(DiagramError::Failed {
                status,
                stderr: read_captured(&mut stderr_sink)?,
            });
        }

        let svg = std::fs::read_to_string(output.path())?;
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis(),
            bytes = svg.len(),
            "Rendered diagram"
        );
        Ok(svg)
    }
}

/// Wait for `child` to exit, polling until `timeout` elapses.
///
/// Returns `Ok(None)` when the process was killed for exceeding the timeout.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            // Already-exited races surface as an error from kill; reaping is what matters
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn read_captured(file: &mut File) -> std::io::Result<String> {
    let mut captured = String::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_string(&mut captured)?;
    Ok(captured.trim().to_owned())
}
