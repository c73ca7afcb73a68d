//! Named template and theme assets.

use std::borrow::Cow;
use std::collections::HashMap;

/// Built-in full-document template, used when a named template is missing.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/templates/default.html");

/// Built-in stylesheet, used when a named theme is missing.
pub const DEFAULT_CSS: &str = include_str!("../assets/themes/light.css");

/// Read-only lookup of templates and themes by name.
///
/// Returns `None` for unknown names; the caller decides on the fallback.
pub trait AssetProvider: Send + Sync {
    /// HTML template called `name`.
    fn template(&self, name: &str) -> Option<Cow<'static, str>>;

    /// Theme stylesheet called `name`.
    fn theme(&self, name: &str) -> Option<Cow<'static, str>>;
}

#[derive(rust_embed::RustEmbed)]
#[folder = "assets/"]
struct Bundle;

/// Templates and themes compiled into the binary.
///
/// Templates live under `templates/<name>.html`, themes under
/// `themes/<name>.css`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    fn text(path: &str) -> Option<Cow<'static, str>> {
        let file = Bundle::get(path)?;
        match file.data {
            Cow::Borrowed(bytes) => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Cow::Owned(bytes) => String::from_utf8(bytes).ok().map(Cow::Owned),
        }
    }

    /// Names of the bundled templates.
    #[must_use]
    pub fn template_names() -> Vec<String> {
        Self::names("templates/", ".html")
    }

    /// Names of the bundled themes.
    #[must_use]
    pub fn theme_names() -> Vec<String> {
        Self::names("themes/", ".css")
    }

    fn names(prefix: &str, suffix: &str) -> Vec<String> {
        let mut names: Vec<String> = Bundle::iter()
            .filter_map(|path| {
                path.strip_prefix(prefix)
                    .and_then(|rest| rest.strip_suffix(suffix))
                    .map(str::to_owned)
            })
            .collect();
        names.sort();
        names
    }
}

impl AssetProvider for EmbeddedAssets {
    fn template(&self, name: &str) -> Option<Cow<'static, str>> {
        Self::text(&format!("templates/{name}.html"))
    }

    fn theme(&self, name: &str) -> Option<Cow<'static, str>> {
        Self::text(&format!("themes/{name}.css"))
    }
}

/// Fixed in-memory asset set.
///
/// Useful for tests and for embedding callers that ship their own assets.
#[derive(Clone, Debug, Default)]
pub struct StaticAssets {
    templates: HashMap<String, String>,
    themes: HashMap<String, String>,
}

impl StaticAssets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>, html: impl Into<String>) -> Self {
        self.templates.insert(name.into(), html.into());
        self
    }

    /// Add a theme.
    #[must_use]
    pub fn with_theme(mut self, name: impl Into<String>, css: impl Into<String>) -> Self {
        self.themes.insert(name.into(), css.into());
        self
    }
}

impl AssetProvider for StaticAssets {
    fn template(&self, name: &str) -> Option<Cow<'static, str>> {
        self.templates.get(name).cloned().map(Cow::Owned)
    }

    fn theme(&self, name: &str) -> Option<Cow<'static, str>> {
        self.themes.get(name).cloned().map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_templates_present() {
        assert_eq!(
            EmbeddedAssets::template_names(),
            ["default", "minimal", "technical"]
        );
        for name in EmbeddedAssets::template_names() {
            let html = EmbeddedAssets.template(&name).unwrap();
            assert!(html.contains("{{CONTENT}}"), "{name} lacks content slot");
            assert!(html.contains("{{CSS}}"), "{name} lacks css slot");
        }
    }

    #[test]
    fn test_embedded_themes_present() {
        assert_eq!(EmbeddedAssets::theme_names(), ["dark", "light"]);
        assert!(EmbeddedAssets.theme("dark").unwrap().contains(".hl-comment"));
    }

    #[test]
    fn test_embedded_unknown_names() {
        assert!(EmbeddedAssets.template("nope").is_none());
        assert!(EmbeddedAssets.theme("nope").is_none());
    }

    #[test]
    fn test_default_template_matches_bundle() {
        assert_eq!(EmbeddedAssets.template("default").unwrap(), DEFAULT_TEMPLATE);
        assert_eq!(EmbeddedAssets.theme("light").unwrap(), DEFAULT_CSS);
    }

    #[test]
    fn test_static_assets() {
        let assets = StaticAssets::new()
            .with_template("t", "<p>{{CONTENT}}</p>")
            .with_theme("x", "p{}");
        assert_eq!(assets.template("t").unwrap(), "<p>{{CONTENT}}</p>");
        assert_eq!(assets.theme("x").unwrap(), "p{}");
        assert!(assets.template("x").is_none());
    }
}
