//! CLI command implementations.

pub(crate) mod batch;
pub(crate) mod convert;
pub(crate) mod watch;

use std::path::PathBuf;

use clap::Args;
use mdpdf_config::{CliSettings, Config};
use mdpdf_core::Converter;
use mdpdf_pdf::ChromeRenderer;

pub(crate) use batch::BatchArgs;
pub(crate) use convert::ConvertArgs;
pub(crate) use watch::WatchArgs;

use crate::GlobalArgs;
use crate::error::CliError;

/// Presentation options shared by the conversion commands.
#[derive(Args)]
pub(crate) struct StyleArgs {
    /// Template name (overrides config).
    #[arg(short, long)]
    template: Option<String>,

    /// Custom stylesheet appended after the theme (overrides config).
    #[arg(long)]
    css: Option<PathBuf>,

    /// Theme name (overrides config).
    #[arg(long)]
    theme: Option<String>,
}

impl StyleArgs {
    /// Load the project config with these flags applied on top.
    fn load_config(
        self,
        global: &GlobalArgs,
        output_dir: Option<PathBuf>,
    ) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            template: self.template,
            theme: self.theme,
            css_path: self.css,
            output_dir,
            timeout_secs: global.timeout,
            chrome_path: None,
        };
        let config = Config::load(global.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(config)
    }
}

/// Build the browser-backed converter described by `config`.
fn chrome_converter(config: &Config) -> Converter {
    let renderer = ChromeRenderer::new(config.pdf_resolved.timeout)
        .with_chrome_path(config.pdf_resolved.chrome_path.clone());
    Converter::new(renderer)
}
