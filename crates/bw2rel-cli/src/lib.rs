//! bw2rel - release publishing for the bw2 agent distribution
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Two operations against the release object store:
//!
//! - `publish` uploads a local build-output tree under the
//!   version/platform/architecture-keyed remote prefix.
//! - `publish-installer` substitutes a version into the installer template
//!   and overwrites the published installer at its fixed key.

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bw2rel")]
#[command(author, version, about = "bw2 release publishing tools")]
pub struct Cli {
    /// Show what would be uploaded without touching the store
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Release bucket (overrides BW2REL_STORE_BUCKET)
    #[arg(long, global = true)]
    pub bucket: Option<String>,

    /// S3-compatible endpoint URL (overrides BW2REL_STORE_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload a build-output tree under the versioned release prefix
    Publish {
        /// Release version (x.x.x)
        version: String,
        /// Target platform (windows, darwin, linux)
        platform: String,
        /// Target architecture (e.g. amd64)
        arch: String,
        /// Local directory containing the build output
        path: PathBuf,
        /// Treat a non x.x.x version as a fatal error instead of a warning
        #[arg(long)]
        strict_version: bool,
        /// Continue past per-file upload failures and report them at the end
        #[arg(long)]
        keep_going: bool,
    },
    /// Substitute a version into the installer template and overwrite the published installer
    #[command(name = "publish-installer")]
    PublishInstaller {
        /// Release version (x.x.x)
        version: String,
        /// Installer template file
        #[arg(long, default_value = "agent")]
        template: PathBuf,
    },
}
