use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::MergeError;

/// Global zipmerge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File name of the merged CSV written into the target directory
    #[serde(default = "default_output_name")]
    pub output_name: String,

    /// Suffix identifying archives to extract
    #[serde(default = "default_archive_suffix")]
    pub archive_suffix: String,

    /// Suffix identifying CSV files (archive entries and merge inputs)
    #[serde(default = "default_csv_suffix")]
    pub csv_suffix: String,

    /// Delete processed archives and extracted CSVs after merging
    #[serde(default = "default_cleanup")]
    pub cleanup: bool,

    /// Line ending written between inputs when one lacks a trailing newline
    #[serde(default)]
    pub line_terminator: LineTerminator,

    /// Output format preference
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineTerminator {
    #[default]
    Lf,
    Crlf,
}

impl LineTerminator {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineTerminator::Lf => b"\n",
            LineTerminator::Crlf => b"\r\n",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Quiet,
}

fn default_output_name() -> String {
    "merged_data.csv".to_string()
}
fn default_archive_suffix() -> String {
    ".zip".to_string()
}
fn default_csv_suffix() -> String {
    ".csv".to_string()
}
fn default_cleanup() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_name: default_output_name(),
            archive_suffix: default_archive_suffix(),
            csv_suffix: default_csv_suffix(),
            cleanup: default_cleanup(),
            line_terminator: LineTerminator::Lf,
            output_format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// Get the zipmerge data directory (~/.zipmerge)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".zipmerge")
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from a specific file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Reject values that would make the merge ambiguous or write outside
    /// the target directory.
    pub fn validate(&self) -> std::result::Result<(), MergeError> {
        if self.archive_suffix.is_empty() || self.csv_suffix.is_empty() {
            return Err(MergeError::InvalidConfig {
                message: "archive_suffix and csv_suffix must not be empty".to_string(),
            });
        }

        let name = Path::new(&self.output_name);
        let is_bare = name.file_name().map(|f| f == name.as_os_str()).unwrap_or(false);
        if !is_bare || self.output_name.contains('/') || self.output_name.contains('\\') {
            return Err(MergeError::InvalidConfig {
                message: format!(
                    "output_name must be a plain file name, got '{}'",
                    self.output_name
                ),
            });
        }

        if !self.is_csv_name(&self.output_name) {
            return Err(MergeError::InvalidConfig {
                message: format!(
                    "output_name '{}' must end with '{}'",
                    self.output_name, self.csv_suffix
                ),
            });
        }

        Ok(())
    }

    /// Path of the merged output inside `dir`
    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.output_name)
    }

    pub fn is_archive_name(&self, name: &str) -> bool {
        name.ends_with(&self.archive_suffix)
    }

    pub fn is_csv_name(&self, name: &str) -> bool {
        name.ends_with(&self.csv_suffix)
    }
}
