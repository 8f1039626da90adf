use std::path::PathBuf;

use thiserror::Error;

/// Cycle-level failures of the ingestion loop.
///
/// Per-file read, upload and move failures never appear here; those are
/// contained in the cycle's outcome lists and the relocation report. These
/// variants cover the directory-level and session-level conditions that the
/// polling driver has to decide about.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to list watch directory {}: {source}", .path.display())]
    ListWatchDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create outcome directory {}: {source}", .path.display())]
    PrepareOutcomeDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("outcome directory path {} is occupied by a non-directory", .path.display())]
    OutcomeDirObstructed { path: PathBuf },

    #[error("remote store session is no longer usable: {reason}")]
    SessionLost { reason: String },
}

impl RelayError {
    /// Whether the polling loop must terminate instead of retrying on the
    /// next interval. Directory-level failures are treated as transient
    /// (mounts come and go); a lost session cannot do further useful work.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RelayError::SessionLost { .. })
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
