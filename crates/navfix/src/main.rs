//! navfix CLI - mkdocs navigation repair.
//!
//! One-shot tool: indexes the `.md` files under the documentation root,
//! rewrites the `nav` section of the site configuration so every path
//! reference points at a file that actually exists, and writes the
//! corrected document to the output path. Unresolved references are
//! kept as-is and reported as warnings.

mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use navfix_config::{CliSettings, Config};
use navfix_core::{FileIndex, NavDocument, rewrite_nav};

use error::CliError;
use output::Output;

/// navfix - repair mkdocs navigation paths against the files on disk.
#[derive(Parser)]
#[command(name = "navfix", version, about)]
struct Cli {
    /// Documentation root directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Input site configuration document (overrides config).
    #[arg(short, long)]
    nav_file: Option<PathBuf>,

    /// Output path for the corrected document (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover navfix.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    let cli_settings = CliSettings {
        docs_dir: cli.docs_dir,
        nav_file: cli.nav_file,
        output_file: cli.output,
    };
    let config = Config::load(cli.config.as_deref(), Some(&cli_settings))?;
    let paths = &config.paths_resolved;

    let mut document = NavDocument::load(&paths.nav_file)?;
    let index = FileIndex::build(&paths.docs_dir)?;

    if let Some(nav) = document.nav() {
        let (fixed, report) = rewrite_nav(nav, &index);

        for reference in &report.unresolved {
            output.warning(&format!("No matching file for: {reference}"));
        }
        for reference in &report.ambiguous {
            output.warning(&format!(
                "Ambiguous reference (several files share this name): {reference}"
            ));
        }
        for entry in &report.malformed {
            output.warning(&format!("Unrecognized nav entry left unchanged: {entry}"));
        }
        if report.corrected > 0 {
            output.info(&format!("Corrected {} nav reference(s)", report.corrected));
        }

        document.set_nav(fixed);
    }

    document.save(&paths.output_file)?;
    output.success(&format!(
        "Wrote corrected navigation to {}",
        paths.output_file.display()
    ));
    Ok(())
}
