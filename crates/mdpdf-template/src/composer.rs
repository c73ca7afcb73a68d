//! Full-document composition.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use mdpdf_config::RunConfig;
use mdpdf_renderer::escape_html;
use regex::{Captures, Regex};

use crate::assets::{AssetProvider, DEFAULT_CSS, DEFAULT_TEMPLATE, EmbeddedAssets};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(TITLE|CSS|CONTENT)\}\}").unwrap());

/// Error raised while composing a document.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// An explicitly requested stylesheet could not be read.
    #[error("Failed to read custom CSS file {}: {source}", path.display())]
    CustomCss {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Wraps rendered HTML in a page template with the theme stylesheet.
///
/// Unknown template and theme names fall back to the built-in defaults.
/// Only an explicit custom stylesheet that cannot be read is an error.
pub struct TemplateComposer<P = EmbeddedAssets> {
    assets: P,
}

impl TemplateComposer {
    /// Create a composer over the bundled assets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_assets(EmbeddedAssets)
    }
}

impl Default for TemplateComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: AssetProvider> TemplateComposer<P> {
    /// Create a composer over a custom asset provider.
    #[must_use]
    pub fn with_assets(assets: P) -> Self {
        Self { assets }
    }

    /// Resolve a template by name.
    pub fn load_template(&self, name: &str) -> Cow<'static, str> {
        self.assets.template(name).unwrap_or_else(|| {
            tracing::warn!(template = name, "Unknown template, using built-in default");
            Cow::Borrowed(DEFAULT_TEMPLATE)
        })
    }

    /// Build the stylesheet: theme (or the built-in default) followed by the
    /// custom stylesheet, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::CustomCss`] if `css_path` cannot be read.
    pub fn load_css(&self, theme: &str, css_path: Option<&Path>) -> Result<String, TemplateError> {
        let theme_css = self.assets.theme(theme).unwrap_or_else(|| {
            tracing::warn!(theme, "Unknown theme, using built-in default");
            Cow::Borrowed(DEFAULT_CSS)
        });

        let mut css = String::with_capacity(theme_css.len() + 1);
        css.push_str(&theme_css);
        css.push('\n');

        if let Some(path) = css_path {
            let custom = std::fs::read_to_string(path).map_err(|source| {
                TemplateError::CustomCss {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            tracing::debug!(path = %path.display(), bytes = custom.len(), "Loaded custom CSS");
            css.push_str(&custom);
        }

        Ok(css)
    }

    /// Produce the complete HTML document for `content`.
    ///
    /// `{{TITLE}}`, `{{CSS}}` and `{{CONTENT}}` are substituted in a single
    /// pass, so placeholder text inside inserted values is never expanded.
    /// The title is HTML-escaped; CSS and content are inserted verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::CustomCss`] if the configured custom
    /// stylesheet cannot be read.
    pub fn compose(
        &self,
        config: &RunConfig,
        title: &str,
        content: &str,
    ) -> Result<String, TemplateError> {
        let template = self.load_template(&config.template);
        let css = self.load_css(&config.theme, config.css_path.as_deref())?;
        let title = escape_html(title);

        let html = PLACEHOLDER_RE.replace_all(&template, |caps: &Captures<'_>| match &caps[1] {
            "TITLE" => title.clone(),
            "CSS" => css.clone(),
            _ => content.to_owned(),
        });
        Ok(html.into_owned())
    }
}
