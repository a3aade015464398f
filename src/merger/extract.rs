use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::common::config::Config;
use crate::common::errors::MergeError;

/// Extract every CSV entry of `archive_path` into `dest`.
///
/// The entry's relative path inside the archive is kept on disk, so
/// `exports/jan.csv` lands at `dest/exports/jan.csv`. Entries are visited
/// in the archive's own listing order and the returned paths follow it.
/// Entry names that would escape `dest` (absolute, or containing `..`) are
/// rewritten to a path inside it, the way `unzip` does.
pub fn extract_csv_entries(
    archive_path: &Path,
    dest: &Path,
    config: &Config,
) -> Result<Vec<PathBuf>, MergeError> {
    let file = fs::File::open(archive_path).map_err(|e| MergeError::io(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| MergeError::archive(archive_path, e))?;

    let mut extracted = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| MergeError::archive(archive_path, e))?;

        if entry.is_dir() || !config.is_csv_name(entry.name()) {
            continue;
        }

        // Leading roots and `..` components are dropped, so the entry
        // always lands inside `dest`
        let relative = entry.mangled_name();
        if relative.as_path() != Path::new(entry.name()) {
            warn!(
                archive = %archive_path.display(),
                entry = entry.name(),
                path = %relative.display(),
                "Archive entry name rewritten to stay inside the directory"
            );
        }

        let output_path = dest.join(&relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| MergeError::io(parent, e))?;
        }

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .map_err(|e| MergeError::archive(archive_path, zip::result::ZipError::Io(e)))?;
        fs::write(&output_path, &contents).map_err(|e| MergeError::io(&output_path, e))?;

        debug!(
            archive = %archive_path.display(),
            path = %output_path.display(),
            "Extracted CSV entry"
        );
        extracted.push(output_path);
    }

    Ok(extracted)
}
