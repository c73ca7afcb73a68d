//! `mdpdf batch` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mdpdf_config::RunConfig;
use mdpdf_core::{is_markdown_file, output_path_for};
use mdpdf_watch::DocumentConverter;

use super::{StyleArgs, chrome_converter};
use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the batch command.
#[derive(Args)]
pub(crate) struct BatchArgs {
    /// Glob pattern selecting the files to convert (e.g. "docs/**/*.md").
    pattern: String,

    /// Directory for the PDFs (default: next to each source, or config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,
}

impl BatchArgs {
    /// Execute the batch command.
    ///
    /// Individual conversion failures are reported and do not fail the
    /// command.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or matches nothing,
    /// configuration fails, or the output directory cannot be created.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let matches = expand_pattern(&self.pattern)?;
        let config = self.style.load_config(global, self.output_dir)?;

        let output_dir = config.output_resolved.dir.clone();
        if let Some(dir) = &output_dir {
            std::fs::create_dir_all(dir)?;
        }

        output.info(&format!("Found {} file(s) to convert", matches.len()));
        let base = config.run_config("", "");
        let mut converter = chrome_converter(&config);
        let converted = convert_all(
            &matches,
            &base,
            output_dir.as_deref(),
            &mut converter,
            &output,
        );

        output.info("");
        output.highlight(&format!(
            "Completed: {converted}/{} files converted successfully",
            matches.len()
        ));
        Ok(())
    }
}

/// Expand `pattern` into the matching paths, in glob order.
fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    let mut matches = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) => matches.push(path),
            Err(e) => tracing::warn!(error = %e, "Skipping unreadable match"),
        }
    }
    if matches.is_empty() {
        return Err(CliError::NoMatches(pattern.to_owned()));
    }
    Ok(matches)
}

/// Convert `inputs` one after another, returning the number that succeeded.
fn convert_all<C: DocumentConverter>(
    inputs: &[PathBuf],
    base: &RunConfig,
    output_dir: Option<&Path>,
    converter: &mut C,
    output: &Output,
) -> usize {
    let mut converted = 0;
    for input in inputs {
        if !is_markdown_file(input) {
            output.warning(&format!("Skipping non-markdown file: {}", input.display()));
            continue;
        }

        let mut run = base.for_document(input, output_path_for(input, output_dir));
        match converter.convert(&mut run) {
            Ok(stats) => {
                output.converted(input, &run.output_path, &stats);
                converted += 1;
            }
            Err(e) => output.failed(input, &e),
        }
    }
    converted
}
