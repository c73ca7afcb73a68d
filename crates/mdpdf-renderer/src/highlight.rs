//! Syntax highlighting for fenced code blocks.
//!
//! Highlighted code is emitted as class-annotated spans (`hl-` prefix) so
//! the active theme stylesheet decides the colors. Blocks without a
//! language tag have their language guessed from the content.

use std::sync::LazyLock;

use regex::Regex;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::RenderError;
use crate::state::escape_html;

/// Prefix for every highlighting class, e.g. `hl-keyword`.
pub const CLASS_PREFIX: &str = "hl-";

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Content patterns for languages whose files rarely start with a shebang.
///
/// Checked in order; the first match wins.
static GUESSES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("json", r#"^\s*[\{\[]\s*("|\]|\}|$)"#),
        ("html", r"(?i)^\s*<(!doctype|html|head|body|div|span|p|table|ul)\b"),
        ("rs", r"(?m)^\s*(pub(\(crate\))?\s+)?(fn|impl|struct|enum|trait|mod|use)\s+[\w:{]"),
        ("go", r"(?m)^\s*(package\s+\w+\s*$|func\s+(\(\w+\s+\*?\w+\)\s*)?\w+\()"),
        ("py", r"(?m)^\s*(def\s+\w+\(.*\)\s*:|class\s+\w+(\(.*\))?\s*:|from\s+[\w.]+\s+import\s|import\s+\w+\s*$)"),
        ("c", r#"(?m)^\s*#include\s*[<"]"#),
        ("js", r"(?m)(^\s*(const|let|var)\s+\w+\s*=|\bfunction\s*\w*\s*\(|=>\s*[\{(]|console\.log\()"),
        ("sql", r"(?i)^\s*(select\s.+\sfrom\s|insert\s+into\s|update\s+\w+\s+set\s|delete\s+from\s|create\s+(table|index|view)\s)"),
        ("sh", r"(?m)^\s*(\$\s|export\s+\w+=|(sudo|apt|apt-get|brew|npm|cargo|git|cd|echo|curl)\s)"),
        ("yaml", r"(?m)\A(---\s*\n)?([\w-]+:(\s.*)?\n)+[\w-]+:(\s.*)?\s*\z"),
    ]
    .into_iter()
    .map(|(token, pattern)| (token, Regex::new(pattern).unwrap()))
    .collect()
});

/// Render a code block as highlighted HTML.
///
/// An explicit `language` that syntect does not know falls back to plain
/// text. A missing language is guessed from the code.
pub(crate) fn highlight_code(language: Option<&str>, code: &str) -> Result<String, RenderError> {
    let syntax_set = &*SYNTAX_SET;
    let syntax = match language {
        Some(token) => {
            find_syntax(syntax_set, token).unwrap_or_else(|| syntax_set.find_syntax_plain_text())
        }
        None => guess_syntax(syntax_set, code),
    };

    let mut code_with_newline = code.to_owned();
    if !code_with_newline.ends_with('\n') {
        code_with_newline.push('\n');
    }

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        syntax_set,
        ClassStyle::SpacedPrefixed {
            prefix: CLASS_PREFIX,
        },
    );
    for line in LinesWithEndings::from(code_with_newline.as_str()) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|err| RenderError::Highlighting {
                language: language.unwrap_or(&syntax.name).to_owned(),
                message: err.to_string(),
            })?;
    }
    let highlighted = generator.finalize();

    let class = match language {
        Some(token) => format!(r#" class="language-{}""#, escape_html(token)),
        None if syntax.name == syntax_set.find_syntax_plain_text().name => String::new(),
        None => syntax
            .file_extensions
            .first()
            .map(|ext| format!(r#" class="language-{ext}""#))
            .unwrap_or_default(),
    };

    Ok(format!(
        r#"<pre class="highlight"><code{class}>{highlighted}</code></pre>"#
    ))
}

fn find_syntax<'a>(syntax_set: &'a SyntaxSet, token: &str) -> Option<&'a SyntaxReference> {
    let lowercase = token.to_ascii_lowercase();
    syntax_set
        .find_syntax_by_token(&lowercase)
        .or_else(|| syntax_set.find_syntax_by_name(token))
        .or_else(|| syntax_set.find_syntax_by_extension(&lowercase))
}

/// Guess the syntax of untagged code.
///
/// Tries the first line (shebangs, modelines, XML declarations), then the
/// content patterns, and settles on plain text.
fn guess_syntax<'a>(syntax_set: &'a SyntaxSet, code: &str) -> &'a SyntaxReference {
    if let Some(syntax) = syntax_set.find_syntax_by_first_line(code) {
        return syntax;
    }
    GUESSES
        .iter()
        .find(|(_, pattern)| pattern.is_match(code))
        .and_then(|(token, _)| syntax_set.find_syntax_by_token(token))
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guessed_name(code: &str) -> String {
        guess_syntax(&SYNTAX_SET, code).name.clone()
    }

    #[test]
    fn test_explicit_language() {
        let html = highlight_code(Some("rust"), "fn main() {}\n").unwrap();
        assert!(html.starts_with(r#"<pre class="highlight"><code class="language-rust">"#));
        assert!(html.contains("hl-source hl-rust"));
        assert!(html.contains("hl-storage"));
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let html = highlight_code(Some("klingon"), "qapla' <b>").unwrap();
        assert!(html.contains(r#"class="language-klingon""#));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_code_is_escaped() {
        let html = highlight_code(Some("html"), "<div>&</div>").unwrap();
        assert!(!html.contains("<div>"));
        assert!(html.contains("&lt;"));
    }

    #[test]
    fn test_guess_from_shebang() {
        assert_eq!(guessed_name("#!/usr/bin/env python3\nprint(1)\n"), "Python");
    }

    #[test]
    fn test_guess_from_content() {
        assert_eq!(guessed_name("fn main() {\n    println!(\"hi\");\n}\n"), "Rust");
        assert_eq!(guessed_name("package main\n\nfunc main() {}\n"), "Go");
        assert_eq!(guessed_name("def greet(name):\n    return name\n"), "Python");
        assert_eq!(guessed_name("{\n  \"a\": 1\n}\n"), "JSON");
        assert_eq!(guessed_name("SELECT id FROM users;\n"), "SQL");
        assert_eq!(guessed_name("const x = 1;\n"), "JavaScript");
    }

    #[test]
    fn test_guess_falls_back_to_plain_text() {
        assert_eq!(guessed_name("just some words\n"), "Plain Text");
    }

    #[test]
    fn test_guessed_block_has_language_class() {
        let html = highlight_code(None, "package main\n\nfunc main() {}\n").unwrap();
        assert!(html.contains(r#"class="language-go""#));
    }

    #[test]
    fn test_plain_guess_has_no_language_class() {
        let html = highlight_code(None, "nothing to see").unwrap();
        assert!(html.starts_with(r#"<pre class="highlight"><code>"#));
    }
}
