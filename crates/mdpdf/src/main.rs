//! mdpdf CLI - Markdown to PDF converter.
//!
//! Provides commands for:
//! - `convert`: Convert a single markdown file
//! - `batch`: Convert every markdown file matching a glob
//! - `watch`: Reconvert files in a directory as they change

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BatchArgs, ConvertArgs, WatchArgs};
use output::Output;

/// mdpdf - Markdown to PDF converter.
#[derive(Parser)]
#[command(name = "mdpdf", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover mdpdf.toml).
    #[arg(short, long, global = true, env = "MDPDF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (conversion progress and timing logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// PDF render timeout in seconds (overrides config).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a markdown file to PDF.
    Convert(ConvertArgs),
    /// Convert all markdown files matching a glob pattern.
    Batch(BatchArgs),
    /// Watch a directory and convert markdown files when they change.
    Watch(WatchArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(&cli.global),
        Commands::Batch(args) => args.execute(&cli.global),
        Commands::Watch(args) => args.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
