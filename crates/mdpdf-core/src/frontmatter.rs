//! Front matter extraction.
//!
//! A document may open with a metadata block:
//!
//! ```text
//! ---
//! title: Quarterly Report
//! theme: dark
//! ---
//! # Body starts here
//! ```
//!
//! The opening line must be exactly `---` followed by a newline, and the
//! block ends at the next line that is exactly `---`. A block that never
//! closes is treated as ordinary content.

use mdpdf_config::FrontMatter;

use crate::ConversionError;

const DELIMITER: &[u8] = b"---";

/// Front matter split from a document body.
#[derive(Debug, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub front_matter: FrontMatter,
    /// Everything after the closing delimiter line, or the whole input when
    /// there is no complete block.
    pub body: &'a [u8],
}

/// Split `content` into front matter and body.
///
/// Missing or unterminated blocks are not errors: the input comes back
/// unchanged with empty metadata.
///
/// # Errors
///
/// Returns a [`ConversionError`] if the block is not valid YAML. The error
/// carries the document line of the failure and that line's text.
pub fn extract(content: &[u8]) -> Result<Extracted<'_>, ConversionError> {
    let unchanged = || Extracted {
        front_matter: FrontMatter::default(),
        body: content,
    };

    let Some(rest) = content
        .strip_prefix(DELIMITER)
        .and_then(|rest| rest.strip_prefix(b"\n"))
    else {
        return Ok(unchanged());
    };
    let meta_start = content.len() - rest.len();

    let mut line_start = meta_start;
    let (meta_end, body_start) = loop {
        let newline = content[line_start..].iter().position(|&b| b == b'\n');
        let line_end = newline.map_or(content.len(), |i| line_start + i);
        if &content[line_start..line_end] == DELIMITER {
            break (line_start, newline.map_or(content.len(), |_| line_end + 1));
        }
        match newline {
            Some(_) => line_start = line_end + 1,
            None => {
                tracing::debug!("Front matter block is never closed, treating as content");
                return Ok(unchanged());
            }
        }
    };

    // Lines between the delimiters, without the newline ending the last one.
    let meta = &content[meta_start..meta_end.saturating_sub(1).max(meta_start)];
    let front_matter = parse_block(meta)?;

    Ok(Extracted {
        front_matter,
        body: &content[body_start..],
    })
}

fn parse_block(meta: &[u8]) -> Result<FrontMatter, ConversionError> {
    let yaml = std::str::from_utf8(meta).map_err(|e| {
        ConversionError::new("front matter is not valid UTF-8").with_source(e)
    })?;

    FrontMatter::from_yaml(yaml).map_err(|e| {
        let err = ConversionError::new("invalid YAML front matter");
        let err = match e.location() {
            Some(location) => {
                let snippet = yaml
                    .lines()
                    .nth(location.line().saturating_sub(1))
                    .unwrap_or_default()
                    .trim();
                // Document line 1 is the opening delimiter.
                err.at(location.line() + 1, snippet)
            }
            None => err,
        };
        err.with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_front_matter_unchanged() {
        let content = b"# Title\n\nBody";
        let extracted = extract(content).unwrap();
        assert_eq!(extracted.body, content);
        assert!(extracted.front_matter.is_empty());
    }

    #[test]
    fn test_title_and_body() {
        let extracted = extract(b"---\ntitle: X\n---\nBody").unwrap();
        assert_eq!(extracted.front_matter.title(), Some("X"));
        assert_eq!(extracted.body, b"Body");
    }

    #[test]
    fn test_all_fields() {
        let extracted =
            extract(b"---\ntitle: T\ntheme: dark\ntemplate: minimal\ncss: a.css\n---\n# H\n")
                .unwrap();
        let fm = extracted.front_matter;
        assert_eq!(fm.theme(), Some("dark"));
        assert_eq!(fm.template(), Some("minimal"));
        assert_eq!(fm.css(), Some("a.css"));
        assert_eq!(extracted.body, b"# H\n");
    }

    #[test]
    fn test_unterminated_block_unchanged() {
        let content = b"---\ntitle: X\nno closing line";
        let extracted = extract(content).unwrap();
        assert_eq!(extracted.body, content);
        assert!(extracted.front_matter.is_empty());
    }

    #[test]
    fn test_delimiter_must_open_document() {
        let content = b"\n---\ntitle: X\n---\nBody";
        assert_eq!(extract(content).unwrap().body, content);
    }

    #[test]
    fn test_crlf_delimiter_not_recognised() {
        let content = b"---\r\ntitle: X\r\n---\r\nBody";
        assert_eq!(extract(content).unwrap().body, content);
    }

    #[test]
    fn test_closing_delimiter_must_be_exact() {
        let content = b"---\ntitle: X\n--- \n----\n";
        assert_eq!(extract(content).unwrap().body, content);
    }

    #[test]
    fn test_empty_block() {
        let extracted = extract(b"---\n---\nBody").unwrap();
        assert!(extracted.front_matter.is_empty());
        assert_eq!(extracted.body, b"Body");
    }

    #[test]
    fn test_closing_delimiter_at_end_of_input() {
        let extracted = extract(b"---\ntitle: X\n---").unwrap();
        assert_eq!(extracted.front_matter.title(), Some("X"));
        assert_eq!(extracted.body, b"");
    }

    #[test]
    fn test_body_keeps_later_delimiters() {
        let extracted = extract(b"---\ntitle: X\n---\nA\n---\nB").unwrap();
        assert_eq!(extracted.body, b"A\n---\nB");
    }

    #[test]
    fn test_malformed_yaml_reports_line() {
        let err = extract(b"---\ntitle: ok\ntheme: [unclosed\n---\nBody").unwrap_err();
        assert!(err.line.is_some_and(|line| line >= 2));
        assert!(err.message.contains("invalid YAML front matter"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_yaml_error_snippet_is_offending_line() {
        let err = extract(b"---\ntitle: [a, b\n---\n").unwrap_err();
        assert!(err.to_string().starts_with("line "));
        assert!(err.snippet.is_some());
    }
}
