use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Report from a cleanup pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<CleanupFailure>,
}

/// A path that could not be removed, and why
#[derive(Debug, Clone, Serialize)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl CleanupReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Delete each file in `paths`, in order.
///
/// A failure on one path (missing file, permission denied, a directory in
/// place of a file) is recorded and the remaining paths are still
/// attempted. This never returns an error.
pub fn cleanup_files(paths: &[PathBuf]) -> CleanupReport {
    let mut report = CleanupReport::default();

    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed");
                report.removed.push(path.clone());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove file");
                report.failures.push(CleanupFailure {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        removed = report.removed_count(),
        failed = report.failures.len(),
        "Cleanup finished"
    );
    report
}
