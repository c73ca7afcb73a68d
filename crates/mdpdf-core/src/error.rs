//! Conversion error types.

use std::fmt;
use std::path::PathBuf;

use mdpdf_pdf::PdfError;
use mdpdf_renderer::RenderError;
use mdpdf_template::TemplateError;

/// Boxed underlying cause of a [`ConversionError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error that can be localized to a position in the input document.
#[derive(Debug)]
pub struct ConversionError {
    /// 1-based line in the source document, if known.
    pub line: Option<usize>,
    /// Human-readable summary.
    pub message: String,
    /// Offending source text, if known.
    pub snippet: Option<String>,
    source: Option<BoxError>,
}

impl ConversionError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
            snippet: None,
            source: None,
        }
    }

    /// Attach the source position.
    #[must_use]
    pub fn at(mut self, line: usize, snippet: impl Into<String>) -> Self {
        self.line = Some(line);
        self.snippet = Some(snippet.into());
        self
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) if line > 0 => write!(
                f,
                "line {line}: {} - {}",
                self.message,
                self.snippet.as_deref().unwrap_or_default()
            ),
            _ => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Error from one stage of the conversion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input document could not be read.
    #[error("Failed to read input file {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The front matter block is malformed.
    #[error("Failed to parse front matter: {0}")]
    FrontMatter(#[from] ConversionError),

    /// Markdown could not be rendered.
    #[error("Failed to convert markdown to HTML: {0}")]
    MarkdownRender(#[from] RenderError),

    /// The page template could not be applied.
    #[error("Failed to apply template: {0}")]
    Template(#[from] TemplateError),

    /// The PDF could not be produced.
    #[error("Failed to convert HTML to PDF: {0}")]
    PdfRender(#[from] PdfError),

    /// The PDF could not be written.
    #[error("Failed to write PDF file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
