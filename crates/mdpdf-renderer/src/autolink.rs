//! Extended autolinks for bare URLs and email addresses in prose.
//!
//! Recognises `http://`, `https://` and `www.` URLs plus plain email
//! addresses. Trailing punctuation is left outside the link so a URL at the
//! end of a sentence does not swallow the full stop.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::state::escape_html;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:(?P<url>(?:https?://|www\.)[^\s<]*[^\s<?!.,:;*_~'")\]])|(?P<email>[a-z0-9._+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}))"#,
    )
    .unwrap()
});

/// Escape `text` and wrap every bare URL or email address in an anchor.
pub(crate) fn linkify(text: &str) -> String {
    let mut html = String::with_capacity(text.len());
    let mut last = 0;

    for caps in LINK_RE.captures_iter(text) {
        let (whole, href) = if let Some(url) = caps.name("url") {
            let target = url.as_str();
            let href = if target.len() >= 4 && target[..4].eq_ignore_ascii_case("www.") {
                format!("http://{target}")
            } else {
                target.to_owned()
            };
            (url, href)
        } else if let Some(email) = caps.name("email") {
            (email, format!("mailto:{}", email.as_str()))
        } else {
            continue;
        };

        html.push_str(&escape_html(&text[last..whole.start()]));
        let _ = write!(
            html,
            r#"<a href="{}">{}</a>"#,
            escape_html(&href),
            escape_html(whole.as_str())
        );
        last = whole.end();
    }

    html.push_str(&escape_html(&text[last..]));
    html
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(linkify("a < b"), "a &lt; b");
    }

    #[test]
    fn test_https_url() {
        assert_eq!(
            linkify("see https://example.com/docs for more"),
            r#"see <a href="https://example.com/docs">https://example.com/docs</a> for more"#
        );
    }

    #[test]
    fn test_www_url_gets_scheme() {
        assert_eq!(
            linkify("www.example.com"),
            r#"<a href="http://www.example.com">www.example.com</a>"#
        );
    }

    #[test]
    fn test_trailing_punctuation_excluded() {
        assert_eq!(
            linkify("Visit https://example.com."),
            r#"Visit <a href="https://example.com">https://example.com</a>."#
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(
            linkify("mail me@example.org today"),
            r#"mail <a href="mailto:me@example.org">me@example.org</a> today"#
        );
    }

    #[test]
    fn test_query_string_escaped() {
        assert_eq!(
            linkify("https://x.io/?a=1&b=2"),
            r#"<a href="https://x.io/?a=1&amp;b=2">https://x.io/?a=1&amp;b=2</a>"#
        );
    }

    #[test]
    fn test_no_links() {
        assert_eq!(linkify("nothing here"), "nothing here");
    }
}
