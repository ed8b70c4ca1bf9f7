//! Artifact publish command

use std::path::Path;

use anyhow::{Result, bail};

use bw2rel_core::Reporter;
use bw2rel_core::publish::{ArtifactPublisher, FailurePolicy};
use bw2rel_core::store::{S3Store, StoreConfig};
use bw2rel_core::walk::walk_artifacts;
use bw2rel_schema::{Platform, ReleaseCoordinate, Version};

/// Flags controlling a publish run.
#[derive(Debug, Clone, Copy)]
pub struct PublishOpts {
    /// Fail instead of warning when the version is not `x.x.x`.
    pub strict_version: bool,
    /// Continue past per-file upload failures.
    pub keep_going: bool,
    /// Enumerate and print keys without uploading.
    pub dry_run: bool,
}

/// Upload a build-output tree under the versioned release prefix.
pub async fn publish(
    version: &str,
    platform: &str,
    arch: &str,
    path: &Path,
    opts: &PublishOpts,
    config: StoreConfig,
    reporter: &dyn Reporter,
) -> Result<()> {
    let platform: Platform = platform.parse()?;
    let version = Version::new(version);
    if opts.strict_version && !version.is_canonical() {
        bail!("version number mismatch, expect x.x.x (got {version})");
    }
    let coordinate = ReleaseCoordinate::new(version, platform, arch);

    if opts.dry_run {
        if !coordinate.version.is_canonical() {
            reporter.warning("WARN version number mismatch, expect x.x.x");
        }
        let mut count = 0;
        for entry in walk_artifacts(path)? {
            reporter.info(&format!("would upload {}", coordinate.key_for(&entry.relative)));
            count += 1;
        }
        reporter.summary(count, "would upload");
        return Ok(());
    }

    let store = S3Store::connect(config).await?;
    let policy = if opts.keep_going {
        FailurePolicy::KeepGoing
    } else {
        FailurePolicy::FailFast
    };
    let summary = ArtifactPublisher::new(&store)
        .with_policy(policy)
        .publish(&coordinate, path, reporter)
        .await?;

    if !summary.is_success() {
        bail!(
            "{} of {} uploads failed",
            summary.failed.len(),
            summary.failed.len() + summary.uploaded.len()
        );
    }
    Ok(())
}
