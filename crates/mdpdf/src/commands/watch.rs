//! `mdpdf watch` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpdf_config::RunConfig;
use mdpdf_core::{ConversionStats, ConvertError, Converter};
use mdpdf_watch::{DirectoryWatcher, DocumentConverter};

use super::{StyleArgs, chrome_converter};
use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Directory to watch (not recursive).
    dir: PathBuf,

    /// Directory for the PDFs (default: next to each source, or config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,
}

impl WatchArgs {
    /// Execute the watch command. Runs until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the output directory cannot
    /// be created, or the directory cannot be watched.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.style.load_config(global, self.output_dir)?;

        let output_dir = config.output_resolved.dir.clone();
        if let Some(dir) = &output_dir {
            std::fs::create_dir_all(dir)?;
        }

        output.highlight(&format!("Watching {} for changes", self.dir.display()));
        output.info("Press Ctrl+C to stop");

        let converter = Reporting {
            inner: chrome_converter(&config),
            output,
        };
        DirectoryWatcher::new(self.dir, config.run_config("", ""), converter)
            .with_output_dir(output_dir)
            .run()?;
        Ok(())
    }
}

/// Prints the outcome of every conversion triggered by the watcher.
struct Reporting {
    inner: Converter,
    output: Output,
}

impl DocumentConverter for Reporting {
    type Error = ConvertError;

    fn convert(&mut self, config: &mut RunConfig) -> Result<ConversionStats, ConvertError> {
        let result = self.inner.convert(config);
        match &result {
            Ok(stats) => self
                .output
                .converted(&config.input_path, &config.output_path, stats),
            Err(e) => self.output.failed(&config.input_path, e),
        }
        result
    }
}
