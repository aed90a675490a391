//! md2html CLI - Markdown to standalone HTML.
//!
//! Converts one markdown file, rendering mermaid blocks to inline SVG with
//! mermaid-cli, into `<output-dir>/<name>.html`.

mod convert;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use convert::ConvertArgs;
use output::Output;

/// md2html - Markdown to HTML converter with mermaid diagrams.
#[derive(Parser, Debug)]
#[command(name = "md2html", version, about)]
struct Cli {
    #[command(flatten)]
    args: ConvertArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.args.verbose, env.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.args.execute() {
        output.error(&err.message());
        std::process::exit(1);
    }
}

/// Build the log filter.
///
/// `--verbose` enables INFO level, otherwise `RUST_LOG` applies on top of a
/// WARN default so recovered diagram failures are always reported.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(env.unwrap_or_default())
}
