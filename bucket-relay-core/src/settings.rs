use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

/// Runtime settings for the relay loop, immutable for the process lifetime.
///
/// Built once at startup by the CLI crate's config loader; the connection
/// credential itself stays out of here and goes straight into the store
/// client.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Directory polled for new candidate files.
    pub watch_dir: PathBuf,
    /// Root under which the `uploaded/` and `error/` outcome directories live.
    pub target_root: PathBuf,
    /// Remote container blobs are put into.
    pub container: String,
    /// Pause between cycles.
    pub poll_interval: Duration,
    /// Eligibility suffix for candidate file names, e.g. `.json`.
    pub file_suffix: String,
}

impl RelaySettings {
    pub fn trace_loaded(&self) {
        info!(
            watch_dir = %self.watch_dir.display(),
            target_root = %self.target_root.display(),
            container = %self.container,
            poll_interval_secs = self.poll_interval.as_secs(),
            file_suffix = %self.file_suffix,
            "Loaded relay settings"
        );
        debug!(?self, "Relay settings (full debug)");
    }
}
