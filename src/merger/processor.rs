use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{discover, extract, merge};
use crate::common::config::Config;
use crate::common::errors::MergeError;
use crate::common::format;

/// Outcome of the extraction and merge phase
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub directory: PathBuf,
    /// Merged file, or `None` when there was nothing to merge
    pub output: Option<PathBuf>,
    /// Archives processed, in processing order
    pub archives: Vec<PathBuf>,
    /// CSVs extracted from the archives, in extraction order
    pub extracted: Vec<PathBuf>,
    /// CSVs concatenated into the output, in merge order
    pub merge_inputs: Vec<PathBuf>,
    /// Archives holding an entry named like the output. That entry is
    /// replaced by the merged file and its rows are not merged.
    pub overwritten_entries: Vec<PathBuf>,
    pub bytes_written: u64,
    pub header_written: bool,
}

impl ProcessReport {
    /// Archives followed by extracted CSVs, duplicates dropped.
    /// `protected` never appears in the list, even when an archive
    /// happened to contain an entry of the same name.
    pub fn cleanup_list(&self, protected: &Path) -> Vec<PathBuf> {
        let mut seen: HashSet<&Path> = HashSet::new();
        let mut list = Vec::new();
        for path in self.archives.iter().chain(self.extracted.iter()) {
            if path.as_path() == protected || !seen.insert(path.as_path()) {
                continue;
            }
            list.push(path.clone());
        }
        list
    }
}

/// Extract every CSV from the archives in `dir` and merge all CSVs found in
/// `dir` afterwards into the configured output file.
///
/// Archive and extraction failures abort the run. No output file is
/// created when the directory holds no CSV at merge time.
pub fn process_archives_to_csv(
    dir: &Path,
    config: &Config,
    show_progress: bool,
) -> Result<ProcessReport, MergeError> {
    config.validate()?;

    let archives = discover::list_archives(dir, config)?;
    debug!(dir = %dir.display(), count = archives.len(), "Found archives");

    let pb = if show_progress && !archives.is_empty() {
        let pb = ProgressBar::new(archives.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} Extracting... {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━━░"),
        );
        Some(pb)
    } else {
        None
    };

    let output_path = config.output_path(dir);
    let mut extracted = Vec::new();
    let mut overwritten_entries = Vec::new();
    for archive in &archives {
        if let Some(ref pb) = pb {
            pb.set_message(format::truncate(
                &archive
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy(),
                40,
            ));
        }

        let files = extract::extract_csv_entries(archive, dir, config)?;
        debug!(archive = %archive.display(), csv_files = files.len(), "Archive extracted");
        if files.contains(&output_path) {
            warn!(
                archive = %archive.display(),
                entry = %config.output_name,
                "Archive entry has the output's name and will be overwritten, not merged"
            );
            overwritten_entries.push(archive.clone());
        }
        extracted.extend(files);

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    let merge_inputs = discover::list_merge_inputs(dir, config)?;

    let (output, bytes_written, header_written) = if merge_inputs.is_empty() {
        info!(dir = %dir.display(), "No CSV files to merge");
        (None, 0, false)
    } else {
        let report = merge::merge_csv_files(&merge_inputs, &output_path, config.line_terminator)?;
        info!(output = %report.output.display(), bytes = report.bytes_written, "Created merged CSV");
        (Some(report.output), report.bytes_written, report.header_written)
    };

    info!(
        archives = archives.len(),
        csv_files = merge_inputs.len(),
        "Processed archives"
    );

    Ok(ProcessReport {
        directory: dir.to_path_buf(),
        output,
        archives,
        extracted,
        merge_inputs,
        overwritten_entries,
        bytes_written,
        header_written,
    })
}
