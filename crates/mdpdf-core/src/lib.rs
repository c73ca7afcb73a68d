//! Markdown to PDF conversion pipeline.
//!
//! [`Converter`] ties together front matter extraction, markdown rendering,
//! page templating and PDF rendering for one document at a time. The PDF
//! backend is any [`PdfRenderer`](mdpdf_pdf::PdfRenderer), so the pipeline
//! runs against a fake in tests.

mod converter;
mod error;
pub mod frontmatter;
mod output;
mod stats;

pub use converter::Converter;
pub use error::{BoxError, ConversionError, ConvertError};
pub use output::{MARKDOWN_EXTENSIONS, is_markdown_file, output_path_for};
pub use stats::ConversionStats;
