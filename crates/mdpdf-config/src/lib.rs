//! Configuration management for mdpdf.
//!
//! Three layers feed the settings of a conversion, lowest precedence first:
//!
//! 1. Built-in defaults (`default` template, `light` theme, 30 s timeout).
//! 2. An optional `mdpdf.toml` project file, auto-discovered in the current
//!    directory and its parents.
//! 3. Command-line flags, applied through [`CliSettings`].
//!
//! A fourth layer, document [`FrontMatter`], is folded in per conversion by
//! [`RunConfig::apply_front_matter`] and wins over everything above.
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in:
//! - `render.css`
//! - `pdf.chrome_path`
//! - `output.dir`

mod expand;
mod front_matter;
mod run;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub use front_matter::FrontMatter;
pub use run::{DEFAULT_TEMPLATE, DEFAULT_THEME, RunConfig};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpdf.toml";

/// Default whole-session render deadline.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override template name.
    pub template: Option<String>,
    /// Override theme name.
    pub theme: Option<String>,
    /// Override custom stylesheet.
    pub css_path: Option<PathBuf>,
    /// Override output directory (batch and watch).
    pub output_dir: Option<PathBuf>,
    /// Override render timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override browser executable.
    pub chrome_path: Option<PathBuf>,
}

/// Project configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default presentation settings.
    pub render: RenderConfig,
    /// PDF engine settings (paths are relative strings from TOML).
    pdf: PdfConfigRaw,
    /// Output settings (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved PDF engine configuration (set after loading).
    #[serde(skip)]
    pub pdf_resolved: PdfConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Default presentation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Template name.
    pub template: String,
    /// Theme name.
    pub theme: String,
    /// Custom stylesheet as written in the file.
    css: Option<String>,
    /// Resolved custom stylesheet path (set after loading).
    #[serde(skip)]
    pub css_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_owned(),
            theme: DEFAULT_THEME.to_owned(),
            css: None,
            css_path: None,
        }
    }
}

/// Raw PDF configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PdfConfigRaw {
    timeout_secs: Option<u64>,
    chrome_path: Option<String>,
}

/// Resolved PDF engine configuration.
#[derive(Debug)]
pub struct PdfConfig {
    /// Deadline for the whole navigate, render and capture sequence.
    pub timeout: Duration,
    /// Browser executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            chrome_path: None,
        }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory for PDFs produced in batch and watch modes.
    pub dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`render.css`").
        field: String,
        /// Error message (e.g., "${`STYLE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpdf.toml` in current directory and parents,
    /// falling back to built-in defaults when none exists.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Build the base run configuration for a document.
    ///
    /// Front matter is not applied here; that happens per conversion.
    #[must_use]
    pub fn run_config(
        &self,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> RunConfig {
        RunConfig::new(input_path, output_path)
            .with_template(self.render.template.clone())
            .with_theme(self.render.theme.clone())
            .with_css_path(self.render.css_path.clone())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(template) = &settings.template {
            self.render.template.clone_from(template);
        }
        if let Some(theme) = &settings.theme {
            self.render.theme.clone_from(theme);
        }
        if let Some(css_path) = &settings.css_path {
            self.render.css_path = Some(css_path.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir = Some(output_dir.clone());
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.pdf_resolved.timeout = Duration::from_secs(timeout_secs);
        }
        if let Some(chrome_path) = &settings.chrome_path {
            self.pdf_resolved.chrome_path = Some(chrome_path.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.template, "render.template")?;
        require_non_empty(&self.render.theme, "render.theme")?;
        if self.pdf_resolved.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "pdf.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.render.css, "render.css")?;
        expand::expand_opt(&mut self.pdf.chrome_path, "pdf.chrome_path")?;
        expand::expand_opt(&mut self.output.dir, "output.dir")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>| path.map(|p| config_dir.join(p));

        self.render.css_path = resolve(self.render.css.as_deref());
        self.pdf_resolved = PdfConfig {
            timeout: Duration::from_secs(self.pdf.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            chrome_path: resolve(self.pdf.chrome_path.as_deref()),
        };
        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref()),
        };

        Ok(())
    }
}
