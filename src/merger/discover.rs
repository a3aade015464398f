use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::config::Config;
use crate::common::errors::MergeError;

/// List regular files directly inside `dir` whose file name satisfies
/// `keep`, sorted lexicographically by file name. Subdirectories are not
/// descended into.
pub fn list_files_matching<F>(dir: &Path, keep: F) -> Result<Vec<PathBuf>, MergeError>
where
    F: Fn(&str) -> bool,
{
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(dir, e))?;

        // Symlinks count when they point at a regular file
        if !entry.path().is_file() {
            continue;
        }

        let matches = keep(&entry.file_name().to_string_lossy());
        if matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Archives to extract, in processing order
pub fn list_archives(dir: &Path, config: &Config) -> Result<Vec<PathBuf>, MergeError> {
    list_files_matching(dir, |name| config.is_archive_name(name))
}

/// The merge-input set: every CSV directly in `dir` except the merged
/// output itself, so a previous run's result is never merged into itself.
pub fn list_merge_inputs(dir: &Path, config: &Config) -> Result<Vec<PathBuf>, MergeError> {
    list_files_matching(dir, |name| {
        config.is_csv_name(name) && name != config.output_name
    })
}

fn walk_error(dir: &Path, err: walkdir::Error) -> MergeError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
    MergeError::io(path, source)
}
