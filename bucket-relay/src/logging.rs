//! Diagnostic output wiring: tracing subscriber with optional file redirection.
//!
//! The sink is decided once at startup from configuration and injected into
//! the subscriber here; nothing else in the process touches global streams.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialises the global tracing subscriber.
///
/// Without a log path, diagnostics go to standard output. With one, the file
/// is truncated at startup and receives all diagnostics instead, with ANSI
/// styling off.
pub fn init(log_path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bucket_relay=info,bucket_relay_core=info"));

    match log_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(false).compact())
                .init();
        }
    }

    Ok(())
}
