//! Effective settings for a single conversion.

use std::path::{Path, PathBuf};

use crate::FrontMatter;

/// Template used when none is requested.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Theme used when none is requested.
pub const DEFAULT_THEME: &str = "light";

/// Settings for converting one document.
///
/// Created once per conversion from the invocation settings, then updated
/// in place by [`apply_front_matter`](Self::apply_front_matter) once the
/// document's metadata is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Markdown source file.
    pub input_path: PathBuf,
    /// Destination PDF file.
    pub output_path: PathBuf,
    /// Template name.
    pub template: String,
    /// Custom stylesheet appended after the theme.
    pub css_path: Option<PathBuf>,
    /// Theme name.
    pub theme: String,
}

impl RunConfig {
    /// Create a config with the default template and theme.
    #[must_use]
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            template: DEFAULT_TEMPLATE.to_owned(),
            css_path: None,
            theme: DEFAULT_THEME.to_owned(),
        }
    }

    /// Set the template name.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the theme name.
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set the custom stylesheet path.
    #[must_use]
    pub fn with_css_path(mut self, css_path: Option<PathBuf>) -> Self {
        self.css_path = css_path;
        self
    }

    /// Copy the shared presentation settings for another input/output pair.
    ///
    /// Watch and batch modes hold one base config and derive a fresh one per
    /// file, so front matter applied to one document never leaks into the next.
    #[must_use]
    pub fn for_document(&self, input_path: &Path, output_path: PathBuf) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_path,
            template: self.template.clone(),
            css_path: self.css_path.clone(),
            theme: self.theme.clone(),
        }
    }

    /// Fold document front matter into this config.
    ///
    /// Every non-empty `theme`, `template` or `css` value overwrites the
    /// current setting, including values given explicitly on the command
    /// line. `title` has no counterpart here.
    pub fn apply_front_matter(&mut self, front_matter: &FrontMatter) {
        if let Some(theme) = front_matter.theme() {
            theme.clone_into(&mut self.theme);
        }
        if let Some(template) = front_matter.template() {
            template.clone_into(&mut self.template);
        }
        if let Some(css) = front_matter.css() {
            self.css_path = Some(PathBuf::from(css));
        }
    }

    /// File name of the input, used as the fallback document title.
    #[must_use]
    pub fn input_file_name(&self) -> String {
        self.input_path.file_name().map_or_else(
            || self.input_path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter(yaml: &str) -> FrontMatter {
        FrontMatter::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::new("doc.md", "doc.pdf");
        assert_eq!(config.template, "default");
        assert_eq!(config.theme, "light");
        assert!(config.css_path.is_none());
    }

    #[test]
    fn test_front_matter_theme_overrides() {
        let mut config = RunConfig::new("doc.md", "doc.pdf").with_theme("light");
        config.apply_front_matter(&front_matter("theme: dark"));
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_front_matter_overrides_explicit_values() {
        let mut config = RunConfig::new("doc.md", "doc.pdf")
            .with_template("minimal")
            .with_css_path(Some(PathBuf::from("cli.css")));
        config.apply_front_matter(&front_matter("template: technical\ncss: doc.css"));
        assert_eq!(config.template, "technical");
        assert_eq!(config.css_path, Some(PathBuf::from("doc.css")));
    }

    #[test]
    fn test_empty_front_matter_values_ignored() {
        let mut config = RunConfig::new("doc.md", "doc.pdf")
            .with_theme("dark")
            .with_css_path(Some(PathBuf::from("keep.css")));
        config.apply_front_matter(&front_matter("theme: ''\ncss: \"\"\ntitle: Only title"));
        assert_eq!(config.theme, "dark");
        assert_eq!(config.template, "default");
        assert_eq!(config.css_path, Some(PathBuf::from("keep.css")));
    }

    #[test]
    fn test_for_document_copies_presentation() {
        let base = RunConfig::new("", "")
            .with_theme("dark")
            .with_template("technical")
            .with_css_path(Some(PathBuf::from("print.css")));
        let config = base.for_document(Path::new("notes/a.md"), PathBuf::from("out/a.pdf"));
        assert_eq!(config.input_path, PathBuf::from("notes/a.md"));
        assert_eq!(config.output_path, PathBuf::from("out/a.pdf"));
        assert_eq!(config.theme, "dark");
        assert_eq!(config.template, "technical");
        assert_eq!(config.css_path, Some(PathBuf::from("print.css")));
    }

    #[test]
    fn test_for_document_isolated_from_merge() {
        let base = RunConfig::new("", "");
        let mut config = base.for_document(Path::new("a.md"), PathBuf::from("a.pdf"));
        config.apply_front_matter(&front_matter("theme: dark"));
        assert_eq!(config.theme, "dark");
        assert_eq!(base.theme, "light");
    }

    #[test]
    fn test_input_file_name() {
        let config = RunConfig::new("docs/guide/intro.md", "intro.pdf");
        assert_eq!(config.input_file_name(), "intro.md");
    }
}
