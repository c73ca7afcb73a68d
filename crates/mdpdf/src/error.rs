//! CLI error types.

use std::path::PathBuf;

use mdpdf_config::ConfigError;
use mdpdf_core::ConvertError;
use mdpdf_watch::WatchError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Watch(#[from] WatchError),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("No files match pattern: {0}")]
    NoMatches(String),
}
