//! Reporter trait for dependency injection
//!
//! This trait allows core logic to report progress and status without
//! being coupled to a specific terminal implementation.

use std::path::Path;

pub trait Reporter: Send + Sync {
    /// Indicates a new phase has started (e.g. "Fetching index", "Extracting").
    fn section(&self, title: &str);

    /// Updates the progress of the archive download.
    fn downloading(&self, current: u64, total: Option<u64>);

    /// A member was written to disk at `path`.
    fn extracted(&self, path: &Path);

    /// A member was left out of the extraction.
    fn skipped(&self, path: &Path, reason: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn section(&self, title: &str) {
        (**self).section(title);
    }
    fn downloading(&self, current: u64, total: Option<u64>) {
        (**self).downloading(current, total);
    }
    fn extracted(&self, path: &Path) {
        (**self).extracted(path);
    }
    fn skipped(&self, path: &Path, reason: &str) {
        (**self).skipped(path, reason);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn success(&self, msg: &str) {
        (**self).success(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn downloading(&self, _: u64, _: Option<u64>) {}
    fn extracted(&self, _: &Path) {}
    fn skipped(&self, _: &Path, _: &str) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}

/// Records extracted and skipped paths, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    pub(crate) extracted: std::sync::Mutex<Vec<std::path::PathBuf>>,
    pub(crate) skipped: std::sync::Mutex<Vec<std::path::PathBuf>>,
    pub(crate) progress: std::sync::Mutex<Vec<(u64, Option<u64>)>>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn section(&self, _: &str) {}
    fn downloading(&self, current: u64, total: Option<u64>) {
        self.progress.lock().unwrap().push((current, total));
    }
    fn extracted(&self, path: &Path) {
        self.extracted.lock().unwrap().push(path.to_path_buf());
    }
    fn skipped(&self, path: &Path, _: &str) {
        self.skipped.lock().unwrap().push(path.to_path_buf());
    }
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}
