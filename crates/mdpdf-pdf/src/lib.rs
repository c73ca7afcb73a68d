//! HTML to PDF rendering for mdpdf.
//!
//! This crate provides:
//! - [`PdfRenderer`] trait, the capability the conversion pipeline depends on
//! - [`ChromeRenderer`], driving a headless Chromium-family browser
//! - [`PdfOptions`] page layout (A4, 0.4 inch margins by default)
//! - [`FakePdfRenderer`] for testing (behind `fake` feature flag)

use std::time::Duration;

mod chrome;
#[cfg(any(test, feature = "fake"))]
mod fake;
mod options;

pub use chrome::ChromeRenderer;
#[cfg(any(test, feature = "fake"))]
pub use fake::{FakePdfRenderer, MINIMAL_PDF};
pub use options::PdfOptions;

/// Turns a complete HTML document into PDF bytes.
pub trait PdfRenderer: Send + Sync {
    /// Render `html` to a PDF document.
    fn render(&self, html: &str) -> Result<Vec<u8>, PdfError>;
}

/// Error raised while rendering a PDF.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Staging the document or starting the session worker failed.
    #[error("I/O error while preparing render: {0}")]
    Io(#[from] std::io::Error),

    /// The browser could not be started.
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// The document did not load.
    #[error("Failed to load document: {0}")]
    Navigation(String),

    /// Printing the loaded document failed.
    #[error("Failed to capture PDF: {0}")]
    Capture(String),

    /// The session did not finish within the deadline.
    #[error("PDF rendering timed out after {0:?}")]
    Timeout(Duration),

    /// The session worker stopped without reporting a result.
    #[error("Rendering session ended unexpectedly")]
    Disconnected,
}
