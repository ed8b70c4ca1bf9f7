//! bw2rel - bw2 release publishing CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bw2rel_cli::cmd;
use bw2rel_cli::ui::ConsoleReporter;
use bw2rel_cli::{Cli, Commands};
use bw2rel_core::store::StoreConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Argument errors exit 1, not clap's default of 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    let dry_run = cli.dry_run;
    let reporter = ConsoleReporter::new(cli.quiet);

    let mut config = StoreConfig::from_env();
    if let Some(bucket) = cli.bucket {
        config.bucket = bucket;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = Some(endpoint);
    }

    match cli.command {
        Commands::Publish {
            version,
            platform,
            arch,
            path,
            strict_version,
            keep_going,
        } => {
            let opts = cmd::publish::PublishOpts {
                strict_version,
                keep_going,
                dry_run,
            };
            cmd::publish::publish(&version, &platform, &arch, &path, &opts, config, &reporter).await
        }
        Commands::PublishInstaller { version, template } => {
            cmd::publish_installer::publish_installer(&version, &template, dry_run, config, &reporter)
                .await
        }
    }
}
