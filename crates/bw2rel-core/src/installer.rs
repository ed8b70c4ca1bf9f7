//! Installer template rendering and publishing.
//!
//! The installer is a single text object at the fixed key `agent`,
//! regenerated from a local template on every publish. Every template line
//! containing the marker token is replaced with a `REL=<version>` line.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::reporter::Reporter;
use crate::store::{ObjectStore, StoreError};
use bw2rel_schema::{INSTALLER_KEY, INSTALLER_MARKER, Version};

/// Errors from installer publishing.
#[derive(Error, Debug)]
pub enum InstallerError {
    /// The version is not in canonical `x.x.x` form.
    #[error("version number mismatch, expect x.x.x (got {0})")]
    BadVersion(String),

    /// The template file could not be read.
    #[error("failed to read installer template {}", path.display())]
    Template {
        /// Template path that failed to load.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The store write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Render the installer from a template.
///
/// Each line containing the marker token becomes the substitution line
/// `REL=<version>\n`; all other lines pass through unchanged, in order.
/// A trailing newline in the template is preserved. Pure function of
/// (template, version), so repeated publishes of the same version produce
/// identical objects.
pub fn render_installer(template: &str, version: &Version) -> String {
    let trailing_newline = template.ends_with('\n');

    let lines: Vec<String> = template
        .lines()
        .map(|line| {
            if line.contains(INSTALLER_MARKER) {
                format!("REL={version}\n")
            } else {
                line.to_string()
            }
        })
        .collect();

    let mut rendered = lines.join("\n");
    if trailing_newline {
        rendered.push('\n');
    }
    rendered
}

/// Publishes the rendered installer to the fixed `agent` key.
///
/// Exactly one object write per publish, unconditionally overwriting the
/// previous installer; there is no rollback and no prior-version retention.
/// Correctness of the overwrite rests on the store's atomic single-object
/// write (see [`ObjectStore`]).
pub struct InstallerPublisher<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> InstallerPublisher<'a> {
    /// Create an installer publisher.
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Validate the version, render the template at `template_path`, and
    /// overwrite the published installer.
    ///
    /// # Errors
    ///
    /// Fails with [`InstallerError::BadVersion`] before any store call when
    /// the version is not canonical; otherwise on template read or upload
    /// failure.
    pub async fn publish(
        &self,
        version: &Version,
        template_path: &Path,
        reporter: &dyn Reporter,
    ) -> Result<(), InstallerError> {
        if !version.is_canonical() {
            return Err(InstallerError::BadVersion(version.to_string()));
        }

        let template = tokio::fs::read_to_string(template_path)
            .await
            .map_err(|source| InstallerError::Template {
                path: template_path.to_path_buf(),
                source,
            })?;

        let rendered = render_installer(&template, version);
        tracing::debug!(key = INSTALLER_KEY, bytes = rendered.len(), "uploading installer");
        self.store
            .put_bytes(INSTALLER_KEY, rendered.into_bytes())
            .await?;

        reporter.info("uploaded installer");
        Ok(())
    }
}

impl std::fmt::Debug for InstallerPublisher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallerPublisher").finish_non_exhaustive()
    }
}
