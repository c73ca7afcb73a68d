//! Per-file change debouncing.
//!
//! Editors often emit several write notifications for one save. The
//! debouncer accepts the first notification for a path and drops any further
//! ones until the window has passed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use mdpdf_core::is_markdown_file;

/// Minimum interval between accepted changes to the same file.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(2);

/// Decides which write notifications trigger a conversion.
///
/// Owned by the single consumer of the watch loop; no locking required.
#[derive(Debug)]
pub struct WatchDebouncer {
    window: Duration,
    last_accepted: HashMap<PathBuf, Instant>,
}

impl WatchDebouncer {
    /// Create a debouncer with the default 2 second window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    /// Create a debouncer with a custom window.
    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_accepted: HashMap::new(),
        }
    }

    /// Check a write notification for `path` observed at `now`.
    ///
    /// Returns `true` (and records `now`) if the path is a markdown file and
    /// no change to it was accepted within the window. Paths are compared in
    /// absolute form, so `docs/a.md` and `/work/docs/a.md` share one entry.
    pub fn accept(&mut self, path: &Path, now: Instant) -> bool {
        if !is_markdown_file(path) {
            return false;
        }

        let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        if let Some(last) = self.last_accepted.get(&key)
            && now.saturating_duration_since(*last) < self.window
        {
            tracing::debug!(path = %key.display(), "Change debounced");
            return false;
        }

        self.last_accepted.insert(key, now);
        true
    }
}

impl Default for WatchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
