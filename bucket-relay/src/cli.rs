//! CLI glue for bucket-relay: argument parsing and the async entrypoint.
//!
//! All core business logic (the scan/upload/relocate loop) lives in the
//! `bucket-relay-core` crate. This module is strictly for argument exposure,
//! wiring the plumbing together, and user-visible diagnostics.
//!
//! The async [`run`] entrypoint is public so integration tests can invoke the
//! CLI programmatically with a constructed [`Cli`].

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

use bucket_relay_core::daemon::Daemon;

use crate::load_config::load_config;
use crate::logging;
use crate::store::BlobClient;

/// Watch a directory and relay new data files into a remote storage container.
#[derive(Parser)]
#[clap(
    name = "bucket-relay",
    version,
    about = "Watch a directory and relay new data files into a remote storage container"
)]
pub struct Cli {
    /// Path to the JSON configuration file.
    pub config: PathBuf,
}

/// Extracted async CLI logic entrypoint for integration tests and main().
pub async fn run(cli: Cli) -> Result<()> {
    let loaded = load_config(&cli.config)?;
    logging::init(loaded.log_path.as_deref())?;
    loaded.settings.trace_loaded();

    let store = BlobClient::from_connection_string(&loaded.connection_string)?;
    let daemon = Daemon::new(loaded.settings, store);

    // Clean shutdown: ctrl-c flips the watch channel, which the polling loop
    // observes only between cycles.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
        }
        let _ = shutdown_tx.send(true);
    });

    info!("starting relay daemon");
    daemon.run(shutdown_rx).await?;
    info!("relay daemon stopped");
    Ok(())
}
