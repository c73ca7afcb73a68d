//! Conversion statistics.

use std::sync::LazyLock;
use std::time::{Duration, Instant, SystemTime};

use regex::bytes::Regex;

static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/Type\s*/Page\b").unwrap());

/// Measurements taken around one conversion.
#[derive(Clone, Debug)]
pub struct ConversionStats {
    /// Wall-clock start of the conversion.
    pub started_at: SystemTime,
    /// Wall-clock end, set by [`finish`](Self::finish).
    pub finished_at: Option<SystemTime>,
    /// Size of the markdown source in bytes.
    pub input_size: u64,
    /// Size of the written PDF in bytes.
    pub output_size: u64,
    /// Number of page objects in the PDF. Zero when not determined.
    pub page_count: usize,
    /// Processing time in milliseconds, set by [`finish`](Self::finish).
    pub processing_ms: u64,
    timer: Instant,
}

impl ConversionStats {
    /// Start measuring.
    #[must_use]
    pub fn start() -> Self {
        Self {
            started_at: SystemTime::now(),
            finished_at: None,
            input_size: 0,
            output_size: 0,
            page_count: 0,
            processing_ms: 0,
            timer: Instant::now(),
        }
    }

    /// Record the produced PDF.
    pub fn record_output(&mut self, pdf: &[u8]) {
        self.output_size = pdf.len() as u64;
        self.page_count = count_pages(pdf);
    }

    /// Stop measuring.
    pub fn finish(&mut self) {
        self.finished_at = Some(SystemTime::now());
        self.processing_ms = u64::try_from(self.timer.elapsed().as_millis()).unwrap_or(u64::MAX);
    }

    /// Elapsed processing time.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.processing_ms)
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} → {}",
            format_size(self.input_size),
            format_size(self.output_size)
        );
        if self.page_count > 0 {
            let plural = if self.page_count == 1 { "" } else { "s" };
            summary.push_str(&format!(", {} page{plural}", self.page_count));
        }
        summary.push_str(&format!(" in {}ms", self.processing_ms));
        summary
    }
}

/// Count page objects in an uncompressed PDF object table.
fn count_pages(pdf: &[u8]) -> usize {
    PAGE_RE.find_iter(pdf).count()
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}
