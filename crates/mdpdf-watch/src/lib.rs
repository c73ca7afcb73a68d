//! Watch mode for mdpdf.
//!
//! [`DirectoryWatcher`] listens for writes in one directory and converts
//! changed markdown files, using [`WatchDebouncer`] to collapse bursts of
//! notifications for the same file.

mod debouncer;
mod watcher;

pub use debouncer::{DEBOUNCE_WINDOW, WatchDebouncer};
pub use watcher::{DirectoryWatcher, DocumentConverter, WatchError};
