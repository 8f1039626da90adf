//! Polling driver: repeats scan → upload → relocate at a fixed interval.
//!
//! The loop has a single non-terminal state. Each turn runs one
//! [`Daemon::run_cycle`] pass and then waits for the next tick. Per-file
//! failures never surface here; cycle-level errors are split into transient
//! ones (logged, retried next interval) and fatal ones (the loop returns the
//! error and the process exits with the cause).
//!
//! A shutdown request is observed only between cycles, so a relocation pass
//! is never aborted mid-move.

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::contract::BlobStore;
use crate::cycle::{scan_and_upload, CycleOutcome};
use crate::error::Result;
use crate::relocate::{relocate, RelocationReport};
use crate::settings::RelaySettings;

/// What one full cycle did, for audit logging and tests.
#[derive(Debug)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub relocation: RelocationReport,
}

/// The relay daemon: settings plus a live store session.
///
/// Cycles run strictly sequentially; the store is shared immutably across
/// the uploads of a cycle.
pub struct Daemon<S> {
    settings: RelaySettings,
    store: S,
}

impl<S: BlobStore> Daemon<S> {
    pub fn new(settings: RelaySettings, store: S) -> Self {
        Self { settings, store }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    /// Runs exactly one scan → upload → relocate pass.
    ///
    /// This is the deterministic entrypoint: tests drive single cycles here
    /// without waiting on the wall clock.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        info!(
            path = %self.settings.watch_dir.display(),
            "checking watch directory for new files"
        );
        let outcome = scan_and_upload(
            &self.settings.watch_dir,
            &self.settings.file_suffix,
            &self.settings.container,
            &self.store,
        )
        .await?;
        let relocation = relocate(&outcome, &self.settings.target_root)?;
        Ok(CycleReport {
            outcome,
            relocation,
        })
    }

    /// Runs cycles until a shutdown request or a fatal error.
    ///
    /// The first cycle starts immediately; afterwards the loop ticks at the
    /// configured interval. Transient cycle errors (an unreadable watch or
    /// target directory) are logged and retried on the next tick.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut ticker = time::interval(self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.changed() => {
                    info!("shutdown requested; stopping between cycles");
                    return Ok(());
                }
            }

            match self.run_cycle().await {
                Ok(report) => {
                    info!(
                        uploaded = report.outcome.uploaded.len(),
                        failed = report.outcome.failed.len(),
                        moved = report.relocation.moved.len(),
                        left_behind = report.relocation.left_behind.len(),
                        "cycle complete"
                    );
                }
                Err(e) if e.is_fatal() => {
                    error!(error = %e, "fatal error; terminating polling loop");
                    return Err(e);
                }
                Err(e) => {
                    warn!(error = %e, "cycle failed; will retry next interval");
                }
            }
        }
    }
}
