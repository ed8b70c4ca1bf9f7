//! Installer publish command

use std::path::Path;

use anyhow::{Context, Result, bail};

use bw2rel_core::Reporter;
use bw2rel_core::installer::{InstallerPublisher, render_installer};
use bw2rel_core::store::{S3Store, StoreConfig};
use bw2rel_schema::{INSTALLER_KEY, Version};

/// Render the installer template for `version` and overwrite the published
/// installer at its fixed key.
pub async fn publish_installer(
    version: &str,
    template: &Path,
    dry_run: bool,
    config: StoreConfig,
    reporter: &dyn Reporter,
) -> Result<()> {
    let version = Version::new(version);
    // Fatal before any store client exists, so no network call can happen
    if !version.is_canonical() {
        bail!("version number mismatch, expect x.x.x (got {version})");
    }

    if dry_run {
        let template_text = tokio::fs::read_to_string(template)
            .await
            .with_context(|| format!("failed to read installer template {}", template.display()))?;
        let rendered = render_installer(&template_text, &version);
        reporter.info(&format!(
            "would upload installer ({} bytes) to {INSTALLER_KEY}",
            rendered.len()
        ));
        return Ok(());
    }

    let store = S3Store::connect(config).await?;
    InstallerPublisher::new(&store)
        .publish(&version, template, reporter)
        .await?;
    Ok(())
}
