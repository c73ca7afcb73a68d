//! `mdpdf convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpdf_core::output_path_for;

use super::{StyleArgs, chrome_converter};
use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert.
    input: PathBuf,

    /// Output PDF path (default: input with a .pdf extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is missing, configuration fails or the
    /// conversion fails.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        if !self.input.exists() {
            return Err(CliError::InputNotFound(self.input));
        }

        let config = self.style.load_config(global, None)?;
        let output_path = self
            .output
            .unwrap_or_else(|| output_path_for(&self.input, None));

        let converter = chrome_converter(&config);
        let mut run = config.run_config(&self.input, output_path);
        let stats = converter.convert(&mut run)?;

        Output::new().converted(&run.input_path, &run.output_path, &stats);
        Ok(())
    }
}
