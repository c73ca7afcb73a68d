//! Headless Chrome backend.
//!
//! Each render launches a fresh browser, loads the document from a temporary
//! file and prints it. The whole session runs on a worker thread so a single
//! deadline covers launch, navigation and capture.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, LaunchOptions};
use tempfile::NamedTempFile;

use crate::{PdfError, PdfOptions, PdfRenderer};

/// Renders HTML to PDF with a headless Chromium-family browser.
#[derive(Clone, Debug)]
pub struct ChromeRenderer {
    options: PdfOptions,
    timeout: Duration,
    chrome_path: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
}

impl ChromeRenderer {
    /// Create a renderer with an overall per-document deadline.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            options: PdfOptions::default(),
            timeout,
            chrome_path: None,
            temp_dir: None,
        }
    }

    /// Use a specific browser binary instead of auto-detection.
    #[must_use]
    pub fn with_chrome_path(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_path = path;
        self
    }

    /// Override page layout.
    #[must_use]
    pub fn with_options(mut self, options: PdfOptions) -> Self {
        self.options = options;
        self
    }

    /// Stage temporary HTML files in `dir` instead of the system temp dir.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Write `html` to a scoped temporary file and run `session` on its URL
    /// under the deadline.
    ///
    /// `session` receives the deadline and must bound every blocking step by
    /// it. When the deadline passes this still waits for the worker to wind
    /// down, so a browser from one render never outlives the call. The file
    /// is removed when this returns, whether the session succeeded, failed
    /// or overran the deadline.
    fn render_staged<F>(&self, html: &str, session: F) -> Result<Vec<u8>, PdfError>
    where
        F: FnOnce(String, Instant) -> Result<Vec<u8>, PdfError> + Send + 'static,
    {
        let staged = stage_html(html, self.temp_dir.as_deref())?;
        let url = file_url(staged.path());
        tracing::debug!(path = %staged.path().display(), "Staged HTML for rendering");

        let deadline = Instant::now() + self.timeout;
        let (tx, rx) = mpsc::channel();
        let worker = std::thread::Builder::new()
            .name("mdpdf-render".to_owned())
            .spawn(move || {
                let _ = tx.send(session(url, deadline));
            })?;

        let result = match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis(),
                    "Render deadline passed, waiting for browser session to close"
                );
                Err(PdfError::Timeout(self.timeout))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(PdfError::Disconnected),
        };

        // A panicked worker already reported Disconnected.
        let _ = worker.join();
        drop(staged);
        result
    }
}

impl PdfRenderer for ChromeRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let start = Instant::now();
        let launch = LaunchOptions {
            path: self.chrome_path.clone(),
            idle_browser_timeout: self.timeout,
            ..LaunchOptions::default()
        };
        let options = self.options;

        let pdf = self.render_staged(html, move |url, deadline| {
            run_session(launch, &url, &options, deadline)
        })?;

        tracing::info!(
            bytes = pdf.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Rendered PDF"
        );
        Ok(pdf)
    }
}

/// Launch a browser, load `url` and print it.
///
/// Each wait is limited to the time left before `deadline`. The browser
/// process is killed when it drops at the end of this function.
fn run_session(
    launch: LaunchOptions<'static>,
    url: &str,
    options: &PdfOptions,
    deadline: Instant,
) -> Result<Vec<u8>, PdfError> {
    let remaining = || deadline.saturating_duration_since(Instant::now());

    let browser = Browser::new(launch).map_err(|e| PdfError::Launch(format!("{e:#}")))?;
    let tab = browser
        .new_tab()
        .map_err(|e| PdfError::Launch(format!("{e:#}")))?;

    tab.set_default_timeout(remaining())
        .navigate_to(url)
        .and_then(|tab| tab.set_default_timeout(remaining()).wait_until_navigated())
        .and_then(|tab| {
            tab.set_default_timeout(remaining())
                .wait_for_element("body")
                .map(|_| tab)
        })
        .map_err(|e| PdfError::Navigation(format!("{e:#}")))?;

    tab.set_default_timeout(remaining());
    tab.print_to_pdf(Some(options.into()))
        .map_err(|e| PdfError::Capture(format!("{e:#}")))
}

/// Write `html` to a fresh `mdpdf_*.html` file that is deleted on drop.
fn stage_html(html: &str, dir: Option<&Path>) -> Result<NamedTempFile, PdfError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("mdpdf_").suffix(".html");
    let mut file = match dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(html.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    }
}
