//! Table of contents injection.
//!
//! Works on rendered HTML rather than parser events: every `<h1>`..`<h6>`
//! carrying an `id` attribute becomes an entry, labelled with the first run
//! of text inside the tag. Headings that open with nested markup have no
//! leading text run and are skipped.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

/// Sentinel comment requesting a table of contents at its position.
pub const TOC_MARKER: &str = "<!-- TOC -->";

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<h([1-6])\b[^>]*\bid="([^"]*)"[^>]*>([^<]+)"#).unwrap());

/// A heading found in rendered HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Anchor id, as it appears in the markup.
    pub id: String,
    /// Trimmed label, as it appears in the markup.
    pub title: String,
}

/// Replaces [`TOC_MARKER`] with a list of the document's headings.
#[derive(Clone, Copy, Debug, Default)]
pub struct TocInjector;

impl TocInjector {
    /// Collect headings in document order.
    #[must_use]
    pub fn collect(html: &str) -> Vec<TocEntry> {
        HEADING_RE
            .captures_iter(html)
            .filter_map(|caps| {
                let level = caps[1].parse().ok()?;
                Some(TocEntry {
                    level,
                    id: caps[2].to_owned(),
                    title: caps[3].trim().to_owned(),
                })
            })
            .collect()
    }

    /// Build the table of contents block for `entries`.
    ///
    /// Returns an empty string when there are no entries. Each entry is
    /// indented by one unit (two spaces) per level below `h1` and tagged with
    /// a `toc-h{level}` class so the stylesheet can indent it visually.
    #[must_use]
    pub fn build(entries: &[TocEntry]) -> String {
        if entries.is_empty() {
            return String::new();
        }

        let mut toc = String::from("<div class=\"toc\">\n<h2>Table of Contents</h2>\n<ul>\n");
        for entry in entries {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            let _ = writeln!(
                toc,
                r##"{indent}<li class="toc-h{}"><a href="#{}">{}</a></li>"##,
                entry.level, entry.id, entry.title
            );
        }
        toc.push_str("</ul>\n</div>\n");
        toc
    }

    /// Replace every marker in `html` with the table of contents.
    ///
    /// Documents without the marker are returned unchanged. Documents with
    /// the marker but no eligible headings lose the marker.
    #[must_use]
    pub fn inject(html: &str) -> String {
        if !html.contains(TOC_MARKER) {
            return html.to_owned();
        }
        let entries = Self::collect(html);
        tracing::debug!(entries = entries.len(), "Injecting table of contents");
        html.replace(TOC_MARKER, &Self::build(&entries))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_marker_unchanged() {
        let html = r#"<h1 id="a">A</h1><p>text</p>"#;
        assert_eq!(TocInjector::inject(html), html);
    }

    #[test]
    fn test_marker_replaced_with_list() {
        let html = "<!-- TOC -->\n<h1 id=\"intro\">Intro</h1><h2 id=\"setup\">Setup</h2>";
        let expected = concat!(
            "<div class=\"toc\">\n<h2>Table of Contents</h2>\n<ul>\n",
            "<li class=\"toc-h1\"><a href=\"#intro\">Intro</a></li>\n",
            "  <li class=\"toc-h2\"><a href=\"#setup\">Setup</a></li>\n",
            "</ul>\n</div>\n",
            "\n<h1 id=\"intro\">Intro</h1><h2 id=\"setup\">Setup</h2>",
        );
        assert_eq!(TocInjector::inject(html), expected);
    }

    #[test]
    fn test_marker_without_headings_removed() {
        assert_eq!(TocInjector::inject("<p>a</p><!-- TOC --><p>b</p>"), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_every_marker_replaced() {
        let html = "<!-- TOC --><h2 id=\"x\">X</h2><!-- TOC -->";
        let out = TocInjector::inject(html);
        assert!(!out.contains(TOC_MARKER));
        assert_eq!(out.matches("class=\"toc\"").count(), 2);
    }

    #[test]
    fn test_heading_without_id_skipped() {
        let entries = TocInjector::collect(r#"<h2>No id</h2><h3 id="yes">Yes</h3>"#);
        assert_eq!(
            entries,
            vec![TocEntry {
                level: 3,
                id: "yes".to_owned(),
                title: "Yes".to_owned(),
            }]
        );
    }

    #[test]
    fn test_first_text_run_only() {
        let entries = TocInjector::collect(
            r#"<h2 id="a">  Install <code>npm</code></h2><h2 id="b"><em>Lead</em> tail</h2>"#,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Install");
    }

    #[test]
    fn test_indent_grows_with_level() {
        let toc = TocInjector::build(&[
            TocEntry {
                level: 1,
                id: "a".to_owned(),
                title: "A".to_owned(),
            },
            TocEntry {
                level: 4,
                id: "b".to_owned(),
                title: "B".to_owned(),
            },
        ]);
        assert!(toc.contains("\n<li class=\"toc-h1\">"));
        assert!(toc.contains("\n      <li class=\"toc-h4\">"));
    }

    #[test]
    fn test_extra_attributes_tolerated() {
        let entries = TocInjector::collect(r#"<h3 class="x" id="deep" data-k="v">Deep</h3>"#);
        assert_eq!(entries[0].id, "deep");
        assert_eq!(entries[0].level, 3);
    }
}
