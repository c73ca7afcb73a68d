//! Output path rules shared by the batch and watch modes.

use std::path::{Path, PathBuf};

/// File extensions treated as markdown (compared case-insensitively).
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Check if `path` names a markdown file.
#[must_use]
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
}

/// PDF path for `input`.
///
/// With an output directory the PDF is `<dir>/<stem>.pdf`; otherwise it sits
/// next to the input with the extension replaced.
#[must_use]
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match (output_dir, input.file_stem()) {
        (Some(dir), Some(stem)) => {
            let mut name = stem.to_os_string();
            name.push(".pdf");
            dir.join(name)
        }
        _ => input.with_extension("pdf"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("a.md")));
        assert!(is_markdown_file(Path::new("dir/b.markdown")));
        assert!(is_markdown_file(Path::new("C.MD")));
        assert!(is_markdown_file(Path::new("d.Markdown")));
        assert!(!is_markdown_file(Path::new("e.txt")));
        assert!(!is_markdown_file(Path::new("md")));
        assert!(!is_markdown_file(Path::new("f.md.bak")));
    }

    #[test]
    fn test_output_next_to_input() {
        assert_eq!(
            output_path_for(Path::new("docs/guide.md"), None),
            PathBuf::from("docs/guide.pdf")
        );
        assert_eq!(output_path_for(Path::new("notes"), None), PathBuf::from("notes.pdf"));
    }

    #[test]
    fn test_output_in_directory() {
        assert_eq!(
            output_path_for(Path::new("docs/guide.markdown"), Some(Path::new("pdfs"))),
            PathBuf::from("pdfs/guide.pdf")
        );
    }

    #[test]
    fn test_output_keeps_inner_dots() {
        assert_eq!(
            output_path_for(Path::new("v1.2.notes.md"), Some(Path::new("out"))),
            PathBuf::from("out/v1.2.notes.pdf")
        );
    }
}
