use std::path::PathBuf;

/// Typed errors for the extraction and merge phase.
/// The CLI wraps these in `anyhow`, but the merger is precise about
/// which file failed and why.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// File system operation failed
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive is corrupt or an entry could not be read
    #[error("Failed to read archive '{}': {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// CSV input could not be read or the output could not be written
    #[error("CSV error in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Configuration values are unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl MergeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MergeError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        MergeError::Archive {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        MergeError::Csv {
            path: path.into(),
            source,
        }
    }
}
