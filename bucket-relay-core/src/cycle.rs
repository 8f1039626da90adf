//! Scan-and-upload cycle: one pass over the watch directory.
//!
//! Lists the direct entries of the watch directory (never recursing), filters
//! to regular files carrying the configured suffix, and attempts to read and
//! upload each one through the [`BlobStore`] gateway. The result is a
//! partition of every attempted file into an uploaded list and a failed list;
//! a single file's failure never aborts the pass.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::contract::{BlobStore, NewBlob, StoreError};
use crate::error::{RelayError, Result};

/// Partition of one cycle's candidate files by upload outcome.
///
/// Exists only as a cycle's return value; the relocation step consumes it and
/// the next cycle starts from a fresh directory listing.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    pub uploaded: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl CycleOutcome {
    pub fn is_empty(&self) -> bool {
        self.uploaded.is_empty() && self.failed.is_empty()
    }
}

/// Scans `watch_dir` and uploads every eligible file through `store`.
///
/// Eligibility is an exact suffix match on the file name; entries that are
/// not regular files (including any outcome directories nested under the
/// watch path) are left untouched. Files are attempted in listing order, at
/// most once per pass; no ordering promise beyond that.
///
/// A read failure or a per-blob rejection classifies the file into the
/// failed list and the pass continues. A failure to list the directory
/// itself, or a lost store session, aborts the pass with an error.
pub async fn scan_and_upload<S>(
    watch_dir: &Path,
    file_suffix: &str,
    container: &str,
    store: &S,
) -> Result<CycleOutcome>
where
    S: BlobStore + ?Sized,
{
    let entries = fs::read_dir(watch_dir).map_err(|e| RelayError::ListWatchDir {
        path: watch_dir.to_path_buf(),
        source: e,
    })?;

    let mut outcome = CycleOutcome::default();

    for entry in entries {
        let entry = entry.map_err(|e| RelayError::ListWatchDir {
            path: watch_dir.to_path_buf(),
            source: e,
        })?;

        let is_file = entry
            .file_type()
            .map(|kind| kind.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            warn!(entry = ?file_name, "skipping file with non-UTF-8 name");
            continue;
        };
        if !name.ends_with(file_suffix) {
            continue;
        }

        let path = entry.path();
        let content = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    file = %path.display(),
                    error = %e,
                    "failed to read candidate file; classifying as failed"
                );
                outcome.failed.push(path);
                continue;
            }
        };

        info!(
            file = name,
            container,
            bytes = content.len(),
            "uploading candidate file to remote container"
        );
        match store
            .put_blob(NewBlob {
                container,
                name,
                content: &content,
            })
            .await
        {
            Ok(()) => {
                info!(file = name, "upload succeeded");
                outcome.uploaded.push(path);
            }
            Err(StoreError::Rejected { reason, .. }) => {
                error!(file = name, reason = %reason, "upload rejected; classifying as failed");
                outcome.failed.push(path);
            }
            Err(StoreError::SessionLost { reason }) => {
                error!(file = name, reason = %reason, "store session lost mid-cycle");
                return Err(RelayError::SessionLost { reason });
            }
        }
    }

    info!(
        uploaded = outcome.uploaded.len(),
        failed = outcome.failed.len(),
        "scan-and-upload pass complete"
    );
    Ok(outcome)
}
