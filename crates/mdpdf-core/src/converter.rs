//! The conversion pipeline.

use std::borrow::Cow;

use mdpdf_config::RunConfig;
use mdpdf_pdf::{ChromeRenderer, PdfRenderer};
use mdpdf_renderer::{MarkdownRenderer, TocInjector};
use mdpdf_template::{AssetProvider, EmbeddedAssets, TemplateComposer};

use crate::frontmatter::extract;
use crate::{ConversionStats, ConvertError};

/// Converts markdown files to PDF.
///
/// Stages run in order and the first failure aborts the conversion:
/// read input, extract front matter, merge it into the run config, render
/// markdown, inject the table of contents, compose the page, render the PDF
/// and write it out.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use mdpdf_config::RunConfig;
/// use mdpdf_core::Converter;
/// use mdpdf_pdf::ChromeRenderer;
///
/// let converter = Converter::new(ChromeRenderer::new(Duration::from_secs(30)));
/// let mut config = RunConfig::new("guide.md", "guide.pdf");
/// let stats = converter.convert(&mut config)?;
/// println!("{}", stats.summary());
/// ```
pub struct Converter<R = ChromeRenderer, P = EmbeddedAssets> {
    pdf: R,
    composer: TemplateComposer<P>,
}

impl<R: PdfRenderer> Converter<R> {
    /// Create a converter using the bundled templates and themes.
    #[must_use]
    pub fn new(pdf: R) -> Self {
        Self::with_composer(pdf, TemplateComposer::new())
    }
}

impl<R: PdfRenderer, P: AssetProvider> Converter<R, P> {
    /// Create a converter with a custom template composer.
    #[must_use]
    pub fn with_composer(pdf: R, composer: TemplateComposer<P>) -> Self {
        Self { pdf, composer }
    }

    /// Convert `config.input_path` to a PDF at `config.output_path`.
    ///
    /// `config` is updated with the document's front matter, so after the
    /// call it holds the settings that were actually used.
    pub fn convert(&self, config: &mut RunConfig) -> Result<ConversionStats, ConvertError> {
        let mut stats = ConversionStats::start();
        tracing::debug!(
            input = %config.input_path.display(),
            output = %config.output_path.display(),
            "Starting conversion"
        );

        let content =
            std::fs::read(&config.input_path).map_err(|source| ConvertError::Input {
                path: config.input_path.clone(),
                source,
            })?;
        stats.input_size = content.len() as u64;

        let html = self.render_html(config, &content)?;
        let pdf = self.pdf.render(&html)?;

        std::fs::write(&config.output_path, &pdf).map_err(|source| ConvertError::Output {
            path: config.output_path.clone(),
            source,
        })?;

        stats.record_output(&pdf);
        stats.finish();
        tracing::info!(
            input = %config.input_path.display(),
            output = %config.output_path.display(),
            input_bytes = stats.input_size,
            output_bytes = stats.output_size,
            elapsed_ms = stats.processing_ms,
            "Converted document"
        );
        Ok(stats)
    }

    /// Produce the complete HTML document for markdown `content`.
    ///
    /// Everything before PDF rendering: front matter is merged into
    /// `config`, the body rendered, the table of contents injected and the
    /// result wrapped in the configured template.
    pub fn render_html(&self, config: &mut RunConfig, content: &[u8]) -> Result<String, ConvertError> {
        let extracted = extract(content)?;
        let front_matter = extracted.front_matter;
        if !front_matter.is_empty() {
            tracing::debug!(?front_matter, "Applying front matter");
        }
        config.apply_front_matter(&front_matter);

        let body = String::from_utf8_lossy(extracted.body);
        if let Cow::Owned(_) = body {
            tracing::warn!(
                path = %config.input_path.display(),
                "Document body is not valid UTF-8, invalid bytes replaced"
            );
        }
        let fragment = MarkdownRenderer::new().render(&body)?;
        let fragment = TocInjector::inject(&fragment);

        let title = front_matter
            .title()
            .map_or_else(|| config.input_file_name(), str::to_owned);
        Ok(self.composer.compose(config, &title, &fragment)?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mdpdf_pdf::{FakePdfRenderer, MINIMAL_PDF};
    use mdpdf_template::StaticAssets;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn static_converter(renderer: FakePdfRenderer) -> Converter<FakePdfRenderer, StaticAssets> {
        Converter::with_composer(
            renderer,
            TemplateComposer::with_assets(
                StaticAssets::new()
                    .with_template("default", "<title>{{TITLE}}</title>{{CONTENT}}")
                    .with_template("plain", "{{CONTENT}}")
                    .with_theme("light", "")
                    .with_theme("dark", ""),
            ),
        )
    }

    #[test]
    fn test_end_to_end_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "doc.md", "# Title\n\nHello");
        let output = dir.path().join("doc.pdf");

        let converter = Converter::new(FakePdfRenderer::new());
        let mut config = RunConfig::new(&input, &output);
        let stats = converter.convert(&mut config).unwrap();

        let written = std::fs::read(&output).unwrap();
        assert!(!written.is_empty());
        assert_eq!(written, MINIMAL_PDF);
        assert_eq!(stats.output_size, written.len() as u64);
        assert_eq!(stats.input_size, 14);
        assert_eq!(stats.page_count, 1);
        assert!(stats.finished_at.is_some());
    }

    #[test]
    fn test_front_matter_drives_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(
            dir.path(),
            "report.md",
            "---\ntitle: Annual Report\ntheme: dark\ntemplate: plain\n---\n# Intro",
        );
        let renderer = FakePdfRenderer::new();
        let converter = static_converter(renderer);
        let mut config = RunConfig::new(&input, dir.path().join("report.pdf"));

        converter.convert(&mut config).unwrap();

        assert_eq!(config.theme, "dark");
        assert_eq!(config.template, "plain");
        let rendered = converter.pdf.rendered();
        assert_eq!(rendered, [r#"<h1 id="intro">Intro</h1>"#]);
    }

    #[test]
    fn test_title_falls_back_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "notes.md", "text");
        let converter = static_converter(FakePdfRenderer::new());
        let mut config = RunConfig::new(&input, dir.path().join("notes.pdf"));

        let html = converter
            .render_html(&mut config, b"text")
            .unwrap();
        assert_eq!(html, "<title>notes.md</title><p>text</p>");
    }

    #[test]
    fn test_toc_injected_before_templating() {
        let converter = static_converter(FakePdfRenderer::new());
        let mut config = RunConfig::new("a.md", "a.pdf").with_template("plain");
        let html = converter
            .render_html(&mut config, b"<!-- TOC -->\n\n# A\n\n## B")
            .unwrap();
        assert!(html.starts_with("<div class=\"toc\">"));
        assert!(html.contains("  <li class=\"toc-h2\"><a href=\"#b\">B</a></li>"));
    }

    #[test]
    fn test_invalid_utf8_body_rendered_with_replacement() {
        let converter = static_converter(FakePdfRenderer::new());
        let mut config = RunConfig::new("a.md", "a.pdf").with_template("plain");
        let html = converter
            .render_html(&mut config, b"---\ntitle: T\n---\ncaf\xE9")
            .unwrap();
        assert_eq!(html, "<p>caf\u{FFFD}</p>");
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let converter = Converter::new(FakePdfRenderer::new());
        let mut config = RunConfig::new(dir.path().join("nope.md"), dir.path().join("nope.pdf"));
        let err = converter.convert(&mut config).unwrap_err();
        assert!(matches!(err, ConvertError::Input { .. }));
    }

    #[test]
    fn test_malformed_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "bad.md", "---\ntitle: [oops\n---\nbody");
        let converter = Converter::new(FakePdfRenderer::new());
        let mut config = RunConfig::new(&input, dir.path().join("bad.pdf"));
        let err = converter.convert(&mut config).unwrap_err();
        assert!(matches!(err, ConvertError::FrontMatter(_)));
        assert!(converter.pdf.rendered().is_empty());
    }

    #[test]
    fn test_missing_custom_css_is_template_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "doc.md", "---\ncss: missing.css\n---\nbody");
        let converter = Converter::new(FakePdfRenderer::new());
        let mut config = RunConfig::new(&input, dir.path().join("doc.pdf"));
        let err = converter.convert(&mut config).unwrap_err();
        assert!(matches!(err, ConvertError::Template(_)));
    }

    #[test]
    fn test_pdf_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "doc.md", "# Doc");
        let output = dir.path().join("doc.pdf");
        let converter = Converter::new(FakePdfRenderer::failing("browser crashed"));
        let mut config = RunConfig::new(&input, &output);
        let err = converter.convert(&mut config).unwrap_err();
        assert!(matches!(err, ConvertError::PdfRender(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "doc.md", "# Doc");
        let converter = Converter::new(FakePdfRenderer::new());
        let mut config = RunConfig::new(&input, dir.path().join("missing-dir").join("doc.pdf"));
        let err = converter.convert(&mut config).unwrap_err();
        assert!(matches!(err, ConvertError::Output { .. }));
    }
}
