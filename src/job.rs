use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::cleaner::{self, CleanupReport};
use crate::common::config::Config;
use crate::merger::{self, ProcessReport};

/// Everything a single run did
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub process: ProcessReport,
    /// `None` when cleanup was disabled
    pub cleanup: Option<CleanupReport>,
    pub duration_secs: f64,
}

/// Run the whole batch job against `dir`: extract and merge, then delete
/// the processed archives and extracted CSVs.
///
/// Only extraction and merge errors are fatal. The merged output is never
/// deleted.
pub fn run_job(dir: &Path, config: &Config, show_progress: bool) -> Result<JobReport> {
    let start = Instant::now();

    if !dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", dir.display());
    }

    let process = merger::process_archives_to_csv(dir, config, show_progress)
        .with_context(|| format!("Failed to merge archives in {}", dir.display()))?;

    let cleanup = if config.cleanup {
        let to_remove = process.cleanup_list(&config.output_path(dir));
        Some(cleaner::cleanup_files(&to_remove))
    } else {
        info!("Cleanup disabled, keeping archives and extracted CSVs");
        None
    };

    Ok(JobReport {
        process,
        cleanup,
        duration_secs: start.elapsed().as_secs_f64(),
    })
}
