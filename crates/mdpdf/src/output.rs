//! Colored terminal output utilities.

use std::path::Path;

use console::{Style, Term};
use mdpdf_core::ConversionStats;

/// Terminal output formatter writing to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.green, msg);
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.yellow, msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        self.styled(&self.cyan_bold, msg);
    }

    /// Report one finished conversion.
    pub(crate) fn converted(&self, input: &Path, output: &Path, stats: &ConversionStats) {
        self.success(&format!("✓ {} → {}", input.display(), output.display()));
        self.info(&format!("  {}", stats.summary()));
    }

    /// Report one failed conversion.
    pub(crate) fn failed(&self, input: &Path, err: &dyn std::fmt::Display) {
        self.error(&format!("✗ {}: {err}", input.display()));
    }
}
