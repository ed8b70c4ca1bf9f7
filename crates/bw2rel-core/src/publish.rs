//! Versioned artifact publishing.
//!
//! Walks a local build-output tree and uploads every file under the
//! release's remote prefix. Linear flow: validate, enumerate, upload,
//! done or fatal. No dedup, no checksums, no resumability; every run
//! re-uploads every file unconditionally.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::reporter::Reporter;
use crate::store::{ObjectStore, StoreError};
use crate::walk::walk_artifacts;
use bw2rel_schema::ReleaseCoordinate;

/// What to do when an individual upload fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the run on the first upload error (strict all-or-nothing).
    #[default]
    FailFast,
    /// Log the failure, continue with the remaining files, and report all
    /// failures at the end (best-effort full-tree publish).
    KeepGoing,
}

/// Outcome of a publish run.
#[derive(Debug, Default)]
pub struct PublishSummary {
    /// Keys uploaded successfully, in walk order.
    pub uploaded: Vec<String>,
    /// Keys that failed, with the upload error. Only non-empty under
    /// [`FailurePolicy::KeepGoing`].
    pub failed: Vec<(String, StoreError)>,
}

impl PublishSummary {
    /// Whether every enumerated file was uploaded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Errors that abort a publish run.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The build-output directory could not be enumerated.
    #[error(transparent)]
    Walk(#[from] anyhow::Error),

    /// An upload failed under [`FailurePolicy::FailFast`].
    #[error(transparent)]
    Upload(#[from] StoreError),
}

/// Uploads a build-output tree under a release coordinate's remote prefix.
pub struct ArtifactPublisher<'a> {
    store: &'a dyn ObjectStore,
    policy: FailurePolicy,
}

impl<'a> ArtifactPublisher<'a> {
    /// Create a publisher with the default fail-fast policy.
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self {
            store,
            policy: FailurePolicy::FailFast,
        }
    }

    /// Override the failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Upload every regular file under `root` to
    /// `bw2/2.x/<platform>/<arch>/<version>/<relative-path>`.
    ///
    /// Emits one warning when the version is not canonical `x.x.x` form;
    /// callers that want a fatal check must enforce it before calling.
    ///
    /// # Errors
    ///
    /// Fails if `root` cannot be enumerated, or (under
    /// [`FailurePolicy::FailFast`]) on the first upload error. Under
    /// [`FailurePolicy::KeepGoing`] upload errors are collected into the
    /// summary instead.
    pub async fn publish(
        &self,
        coordinate: &ReleaseCoordinate,
        root: &Path,
        reporter: &dyn Reporter,
    ) -> Result<PublishSummary, PublishError> {
        if !coordinate.version.is_canonical() {
            tracing::warn!(version = %coordinate.version, "version does not match x.x.x");
            reporter.warning("WARN version number mismatch, expect x.x.x");
        }

        reporter.section(&format!("publishing to {}", coordinate.prefix()));

        let mut summary = PublishSummary::default();
        for entry in walk_artifacts(root)? {
            let key = coordinate.key_for(&entry.relative);
            let size = std::fs::metadata(&entry.path).map(|m| m.len()).unwrap_or(0);

            tracing::debug!(key = %key, path = %entry.path.display(), size, "uploading artifact");
            reporter.uploading(&key, 0, size);

            let progress = |current: u64, total: u64| reporter.uploading(&key, current, total);
            match self.store.put_file(&key, &entry.path, &progress).await {
                Ok(()) => {
                    reporter.done(&key, size);
                    summary.uploaded.push(key);
                }
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "upload failed");
                    reporter.failed(&key, &e.to_string());
                    match self.policy {
                        FailurePolicy::FailFast => return Err(e.into()),
                        FailurePolicy::KeepGoing => summary.failed.push((key, e)),
                    }
                }
            }
        }

        reporter.summary(summary.uploaded.len(), "uploaded");
        Ok(summary)
    }
}

impl fmt::Debug for ArtifactPublisher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactPublisher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use crate::store::MemoryStore;
    use bw2rel_schema::{Platform, Version};
    use std::path::PathBuf;

    fn coordinate() -> ReleaseCoordinate {
        ReleaseCoordinate::new(Version::new("1.0.0"), Platform::Linux, "amd64")
    }

    fn build_tree(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (rel, contents) in files {
            let path: PathBuf = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, contents).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn uploads_one_object_per_file_preserving_relative_paths() {
        let dir = build_tree(&[("a.txt", "x"), ("sub/b.txt", "y")]);
        let store = MemoryStore::new();

        let summary = ArtifactPublisher::new(&store)
            .publish(&coordinate(), dir.path(), &NullReporter)
            .await
            .unwrap();

        assert!(summary.is_success());
        assert_eq!(
            store.keys(),
            vec![
                "bw2/2.x/linux/amd64/1.0.0/a.txt",
                "bw2/2.x/linux/amd64/1.0.0/sub/b.txt",
            ]
        );
        assert_eq!(store.puts()[0].1, b"x");
        assert_eq!(store.puts()[1].1, b"y");
    }

    #[tokio::test]
    async fn empty_tree_uploads_nothing() {
        let dir = build_tree(&[]);
        let store = MemoryStore::new();

        let summary = ArtifactPublisher::new(&store)
            .publish(&coordinate(), dir.path(), &NullReporter)
            .await
            .unwrap();

        assert!(summary.is_success());
        assert!(summary.uploaded.is_empty());
        assert!(store.puts().is_empty());
    }

    #[tokio::test]
    async fn fail_fast_stops_at_first_error() {
        let dir = build_tree(&[("a.txt", "x"), ("sub/b.txt", "y")]);
        let store = MemoryStore::new().failing_on("a.txt");

        let err = ArtifactPublisher::new(&store)
            .publish(&coordinate(), dir.path(), &NullReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Upload(_)));
        // Walk order is deterministic, so the later file was never attempted
        assert!(store.puts().is_empty());
    }

    #[tokio::test]
    async fn keep_going_publishes_the_rest_and_reports_failures() {
        let dir = build_tree(&[("a.txt", "x"), ("sub/b.txt", "y")]);
        let store = MemoryStore::new().failing_on("a.txt");

        let summary = ArtifactPublisher::new(&store)
            .with_policy(FailurePolicy::KeepGoing)
            .publish(&coordinate(), dir.path(), &NullReporter)
            .await
            .unwrap();

        assert!(!summary.is_success());
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "bw2/2.x/linux/amd64/1.0.0/a.txt");
        assert_eq!(store.keys(), vec!["bw2/2.x/linux/amd64/1.0.0/sub/b.txt"]);
    }

    #[tokio::test]
    async fn missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();

        let err = ArtifactPublisher::new(&store)
            .publish(&coordinate(), &dir.path().join("nope"), &NullReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Walk(_)));
        assert!(store.puts().is_empty());
    }

    #[tokio::test]
    async fn non_canonical_version_still_publishes() {
        let dir = build_tree(&[("bw2", "bin")]);
        let store = MemoryStore::new();
        let coord = ReleaseCoordinate::new(Version::new("2.x-dev"), Platform::Darwin, "arm64");

        let summary = ArtifactPublisher::new(&store)
            .publish(&coord, dir.path(), &NullReporter)
            .await
            .unwrap();

        assert!(summary.is_success());
        assert_eq!(store.keys(), vec!["bw2/2.x/darwin/arm64/2.x-dev/bw2"]);
    }
}
