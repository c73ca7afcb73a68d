//! Directory watch loop.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use mdpdf_config::RunConfig;
use mdpdf_core::{ConversionStats, ConvertError, Converter, output_path_for};
use mdpdf_pdf::PdfRenderer;
use mdpdf_template::AssetProvider;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::WatchDebouncer;

/// Error that prevents watching from starting.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The watched path is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The directory path could not be resolved.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The filesystem notifier could not be set up.
    #[error("Failed to watch directory: {0}")]
    Notify(#[from] notify::Error),
}

/// Something that converts one document on demand.
pub trait DocumentConverter {
    type Error: Display;

    /// Convert `config.input_path` to `config.output_path`.
    fn convert(&mut self, config: &mut RunConfig) -> Result<ConversionStats, Self::Error>;
}

impl<R: PdfRenderer, P: AssetProvider> DocumentConverter for Converter<R, P> {
    type Error = ConvertError;

    fn convert(&mut self, config: &mut RunConfig) -> Result<ConversionStats, ConvertError> {
        Converter::convert(self, config)
    }
}

/// Converts markdown files in one directory whenever they are written.
///
/// The directory is watched non-recursively. Each accepted change is
/// converted synchronously using a copy of the base config, so a slow
/// conversion delays the handling of later notifications.
pub struct DirectoryWatcher<C> {
    dir: PathBuf,
    base: RunConfig,
    output_dir: Option<PathBuf>,
    converter: C,
    debouncer: WatchDebouncer,
}

impl<C: DocumentConverter> DirectoryWatcher<C> {
    /// Create a watcher for `dir`.
    ///
    /// `base` supplies the template, theme and stylesheet; its input and
    /// output paths are replaced for every converted file.
    pub fn new(dir: impl Into<PathBuf>, base: RunConfig, converter: C) -> Self {
        Self {
            dir: dir.into(),
            base,
            output_dir: None,
            converter,
            debouncer: WatchDebouncer::new(),
        }
    }

    /// Write PDFs to `dir` instead of next to their sources.
    #[must_use]
    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    /// Replace the debouncer.
    #[must_use]
    pub fn with_debouncer(mut self, debouncer: WatchDebouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    /// Watch until the notification source closes.
    ///
    /// Only setup failures are returned; notifier errors and failed
    /// conversions are logged and watching continues.
    pub fn run(mut self) -> Result<(), WatchError> {
        if !self.dir.is_dir() {
            return Err(WatchError::NotADirectory(self.dir));
        }
        // Event paths are built from the watched path.
        self.dir = std::path::absolute(&self.dir)?;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(&self.dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = %self.dir.display(), "Watching for changes");

        self.process(&rx);
        drop(watcher);
        Ok(())
    }

    /// Consume notifications until every sender is dropped.
    pub fn process(&mut self, rx: &mpsc::Receiver<notify::Result<Event>>) {
        for result in rx {
            match result {
                Ok(event) => self.handle_event(&event, Instant::now()),
                Err(e) => tracing::warn!(error = %e, "Watcher error"),
            }
        }
        tracing::debug!("Notification source closed");
    }

    fn handle_event(&mut self, event: &Event, now: Instant) {
        if !is_write(event.kind) {
            return;
        }
        for path in &event.paths {
            if self.debouncer.accept(path, now) {
                self.convert(path);
            }
        }
    }

    fn convert(&mut self, input: &Path) {
        let output = output_path_for(input, self.output_dir.as_deref());
        let mut config = self.base.for_document(input, output);
        tracing::info!(path = %input.display(), "Change detected");

        match self.converter.convert(&mut config) {
            Ok(stats) => tracing::info!(
                path = %config.output_path.display(),
                elapsed_ms = stats.processing_ms,
                "Converted"
            ),
            Err(e) => tracing::error!(path = %input.display(), error = %e, "Conversion failed"),
        }
    }
}

/// Content writes; renames and metadata-only changes do not count.
fn is_write(kind: EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Other)
    )
}
