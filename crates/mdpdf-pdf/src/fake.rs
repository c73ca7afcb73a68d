//! In-memory renderer for testing.
//!
//! Provides [`FakePdfRenderer`] so conversion pipelines can run without a
//! browser.

use std::sync::Mutex;

use crate::{PdfError, PdfRenderer};

/// Smallest document accepted by common PDF readers: one blank A4 page.
pub const MINIMAL_PDF: &[u8] = b"%PDF-1.4
1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj
2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj
3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] >> endobj
trailer << /Root 1 0 R >>
%%EOF
";

/// Renderer that returns [`MINIMAL_PDF`] and records every HTML input.
///
/// # Example
///
/// ```ignore
/// use mdpdf_pdf::{FakePdfRenderer, PdfRenderer};
///
/// let renderer = FakePdfRenderer::new();
/// let pdf = renderer.render("<p>hi</p>").unwrap();
/// assert!(pdf.starts_with(b"%PDF"));
/// assert_eq!(renderer.rendered(), ["<p>hi</p>"]);
/// ```
#[derive(Debug, Default)]
pub struct FakePdfRenderer {
    rendered: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl FakePdfRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose every call fails with a capture error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rendered: Mutex::default(),
            failure: Some(message.into()),
        }
    }

    /// HTML documents passed to [`render`](PdfRenderer::render), in order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered
            .lock()
            .map(|rendered| rendered.clone())
            .unwrap_or_default()
    }
}

impl PdfRenderer for FakePdfRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        if let Ok(mut rendered) = self.rendered.lock() {
            rendered.push(html.to_owned());
        }
        match &self.failure {
            Some(message) => Err(PdfError::Capture(message.clone())),
            None => Ok(MINIMAL_PDF.to_vec()),
        }
    }
}
