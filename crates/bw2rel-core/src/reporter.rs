//! Reporter trait for dependency injection
//!
//! This trait allows core logic to report progress and status without
//! being coupled to a specific console or CI output implementation.

pub trait Reporter: Send + Sync {
    /// Indicates a new section or phase has started (e.g. "Publishing").
    fn section(&self, title: &str);

    /// Updates the progress of an upload. Called with `current == 0` when
    /// the upload starts, then periodically as bytes are transferred.
    fn uploading(&self, key: &str, current: u64, total: u64);

    /// Marks an upload as successfully completed.
    fn done(&self, key: &str, size: u64);

    /// Marks an upload as failed with a specific reason.
    fn failed(&self, key: &str, reason: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);

    /// Display a final summary of multiple operations.
    fn summary(&self, count: usize, action: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn section(&self, title: &str) {
        (**self).section(title)
    }
    fn uploading(&self, key: &str, current: u64, total: u64) {
        (**self).uploading(key, current, total)
    }
    fn done(&self, key: &str, size: u64) {
        (**self).done(key, size)
    }
    fn failed(&self, key: &str, reason: &str) {
        (**self).failed(key, reason)
    }
    fn info(&self, msg: &str) {
        (**self).info(msg)
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg)
    }
    fn error(&self, msg: &str) {
        (**self).error(msg)
    }
    fn summary(&self, count: usize, action: &str) {
        (**self).summary(count, action)
    }
}

/// A no-op reporter for silent operations (e.g., verification, testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn uploading(&self, _: &str, _: u64, _: u64) {}
    fn done(&self, _: &str, _: u64) {}
    fn failed(&self, _: &str, _: &str) {}
    fn info(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
    fn summary(&self, _: usize, _: &str) {}
}
