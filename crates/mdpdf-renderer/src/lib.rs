//! Markdown rendering for mdpdf.
//!
//! Turns a markdown body into an XHTML fragment ready to be placed in a page
//! template, and injects an optional table of contents.
//!
//! # Quick Start
//!
//! ```
//! use mdpdf_renderer::{MarkdownRenderer, TocInjector};
//!
//! let html = MarkdownRenderer::new()
//!     .render("<!-- TOC -->\n\n# Intro\n\nHello")
//!     .unwrap();
//! let html = TocInjector::inject(&html);
//! assert!(html.contains(r##"<a href="#intro">Intro</a>"##));
//! ```

mod autolink;
mod highlight;
mod renderer;
mod state;
mod toc;

pub use highlight::CLASS_PREFIX;
pub use renderer::MarkdownRenderer;
pub use state::{escape_html, slugify};
pub use toc::{TOC_MARKER, TocEntry, TocInjector};

/// Error raised while rendering markdown.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A code block could not be highlighted.
    #[error("Failed to highlight {language} code block: {message}")]
    Highlighting {
        /// Language the block was highlighted as.
        language: String,
        /// Underlying highlighter message.
        message: String,
    },
}
