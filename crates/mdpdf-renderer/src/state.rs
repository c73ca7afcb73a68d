//! State structs for markdown rendering.
//!
//! These structs track context while the renderer walks parser events.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::{Alignment, HeadingLevel};

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a code block.
    active: bool,
    /// Language of current code block (e.g., "rust", "python").
    language: Option<String>,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    /// Whether we're inside the table header row.
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    /// Current column index in table row.
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub fn end_head(&mut self) {
        self.in_head = false;
    }

    pub fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Get the alignment style for the current cell.
    pub fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for tracking image alt text capture.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt_text: String,
}

impl ImageState {
    pub fn start(&mut self) {
        self.active = true;
        self.alt_text.clear();
    }

    /// End image capture and return the alt text.
    pub fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt_text)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// State for tracking headings and their generated ids.
///
/// Heading markup is buffered until the heading closes, because the id is
/// derived from the complete heading text.
#[derive(Default)]
pub(crate) struct HeadingState {
    /// Current heading level being processed (None if not in a heading).
    current_level: Option<u8>,
    /// Buffer for heading plain text (for the slug).
    text: String,
    /// Buffer for heading HTML (with inline formatting).
    html: String,
    /// Next suffix to try for each slug.
    id_counts: HashMap<String, usize>,
    /// Every id handed out so far.
    used_ids: HashSet<String>,
}

impl HeadingState {
    /// Check if we're currently inside a heading.
    pub fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Complete the heading.
    ///
    /// Returns (level, id, html) or None if not in a heading.
    pub fn complete_heading(&mut self) -> Option<(u8, String, String)> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let id = self.generate_id(&text);
        Some((level, id, html))
    }

    /// Generate a unique ID for a heading.
    ///
    /// Repeated slugs get `-1`, `-2`, ... suffixes in document order, so the
    /// same document always yields the same ids. Suffixes already taken by
    /// another heading are skipped.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let id = if self.used_ids.contains(&base_id) {
            let next = self.id_counts.entry(base_id.clone()).or_insert(1);
            loop {
                let candidate = format!("{base_id}-{next}");
                *next += 1;
                if !self.used_ids.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            base_id
        };
        self.used_ids.insert(id.clone());
        id
    }

    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Convert heading text to an anchor slug.
///
/// Lowercases letters, keeps alphanumerics (including non-ASCII letters),
/// collapses whitespace, dashes and underscores into single dashes and drops
/// everything else. Text with no usable characters becomes `heading`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "heading".to_owned()
    } else {
        result
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake-case");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Über Größe"), "über-größe");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify("!!!"), "heading");
        assert_eq!(slugify(""), "heading");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_code_block_state() {
        let mut state = CodeBlockState::default();
        assert!(!state.is_active());

        state.start(Some("rust".to_owned()));
        assert!(state.is_active());

        state.push_str("fn main() {}");
        let (lang, content) = state.end();
        assert_eq!(lang, Some("rust".to_owned()));
        assert_eq!(content, "fn main() {}");
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_state() {
        let mut state = TableState::default();
        state.start(vec![Alignment::Left, Alignment::Center, Alignment::Right]);

        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:left""#
        );

        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:center""#
        );

        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:right""#
        );

        state.end_head();
        assert!(!state.is_in_head());
    }

    #[test]
    fn test_image_state() {
        let mut state = ImageState::default();
        state.start();
        assert!(state.is_active());
        state.push_str("alt text");
        assert_eq!(state.end(), "alt text");
        assert!(!state.is_active());
    }

    #[test]
    fn test_heading_ids_are_deterministic() {
        let mut first = HeadingState::default();
        let mut second = HeadingState::default();
        for state in [&mut first, &mut second] {
            state.start_heading(2);
            state.push_text("Install Guide");
        }
        let a = first.complete_heading().unwrap();
        let b = second.complete_heading().unwrap();
        assert_eq!(a.1, "install-guide");
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn test_heading_duplicate_ids() {
        let mut state = HeadingState::default();
        let mut ids = Vec::new();
        for _ in 0..3 {
            state.start_heading(2);
            state.push_text("FAQ");
            ids.push(state.complete_heading().unwrap().1);
        }
        assert_eq!(ids, ["faq", "faq-1", "faq-2"]);
    }

    #[test]
    fn test_heading_suffix_skips_taken_ids() {
        let mut state = HeadingState::default();
        let ids: Vec<_> = ["Setup-1", "Setup", "Setup", "Setup-1"]
            .into_iter()
            .map(|text| {
                state.start_heading(2);
                state.push_text(text);
                state.complete_heading().unwrap().1
            })
            .collect();
        assert_eq!(ids, ["setup-1", "setup", "setup-2", "setup-1-1"]);
    }

    #[test]
    fn test_complete_heading_outside_heading() {
        let mut state = HeadingState::default();
        assert!(state.complete_heading().is_none());
    }
}
