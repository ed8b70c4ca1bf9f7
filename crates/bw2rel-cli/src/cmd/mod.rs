//! Subcommand implementations.

pub mod publish;
pub mod publish_installer;
