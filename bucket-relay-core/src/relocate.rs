//! Outcome relocation: partition processed files into `uploaded/` and `error/`.
//!
//! Given a cycle's outcome, moves every succeeded file into
//! `<target_root>/uploaded` and every failed file into `<target_root>/error`,
//! creating both directories on demand. The outcome directories are
//! append-only: nothing already inside them is ever touched, and a move never
//! overwrites an existing destination. A file whose move fails stays in the
//! watch directory and is listed again as a fresh candidate next cycle.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cycle::CycleOutcome;
use crate::error::{RelayError, Result};

pub const UPLOADED_DIR: &str = "uploaded";
pub const ERROR_DIR: &str = "error";

/// Where every file ended up after one relocation pass.
#[derive(Debug, Default)]
pub struct RelocationReport {
    /// Final destinations of every file moved this pass.
    pub moved: Vec<PathBuf>,
    /// Files whose move failed; they remain in the watch directory.
    pub left_behind: Vec<PathBuf>,
}

/// Moves the cycle's files into their outcome directories under `target_root`.
///
/// Preparing an outcome directory is idempotent; it fails only when the path
/// is occupied by a non-directory or cannot be created, and that failure
/// aborts the pass. Individual move failures are logged, recorded in the
/// report, and do not stop the remaining moves.
pub fn relocate(outcome: &CycleOutcome, target_root: &Path) -> Result<RelocationReport> {
    let uploaded_dir = target_root.join(UPLOADED_DIR);
    let error_dir = target_root.join(ERROR_DIR);
    ensure_outcome_dir(&uploaded_dir)?;
    ensure_outcome_dir(&error_dir)?;

    let mut report = RelocationReport::default();
    move_all(&outcome.uploaded, &uploaded_dir, &mut report);
    move_all(&outcome.failed, &error_dir, &mut report);

    if !outcome.is_empty() {
        info!(
            moved = report.moved.len(),
            left_behind = report.left_behind.len(),
            "relocation pass complete"
        );
    }
    Ok(report)
}

fn ensure_outcome_dir(path: &Path) -> Result<()> {
    // Directory semantics, not mere path existence: a stray file squatting on
    // the outcome path is surfaced, never worked around.
    if path.exists() && !path.is_dir() {
        return Err(RelayError::OutcomeDirObstructed {
            path: path.to_path_buf(),
        });
    }
    fs::create_dir_all(path).map_err(|e| RelayError::PrepareOutcomeDir {
        path: path.to_path_buf(),
        source: e,
    })
}

fn move_all(files: &[PathBuf], dest_dir: &Path, report: &mut RelocationReport) {
    for src in files {
        let Some(base_name) = src.file_name() else {
            warn!(file = %src.display(), "file has no base name; leaving in place");
            report.left_behind.push(src.clone());
            continue;
        };
        let dest = dest_dir.join(base_name);
        if dest.exists() {
            warn!(
                file = %src.display(),
                dest = %dest.display(),
                "destination name already occupied; leaving file for next cycle"
            );
            report.left_behind.push(src.clone());
            continue;
        }
        match fs::rename(src, &dest) {
            Ok(()) => {
                info!(file = %src.display(), dest = %dest.display(), "relocated file");
                report.moved.push(dest);
            }
            Err(e) => {
                warn!(
                    file = %src.display(),
                    error = %e,
                    "move failed; file stays in watch directory for retry"
                );
                report.left_behind.push(src.clone());
            }
        }
    }
}
