//! # zipmerge
//!
//! Consolidate periodic data-export archives into one flat CSV.
//!
//! zipmerge extracts the CSV files bundled in the zip archives of a
//! directory, concatenates every CSV found there into `merged_data.csv`
//! (keeping the first file's header only), then removes the archives and
//! the extracted CSVs:
//!
//! - **Deterministic order**: archives and merge inputs are processed in
//!   lexicographic file-name order
//! - **Re-runnable**: the merged output is never treated as an input and is
//!   never deleted
//! - **Best-effort cleanup**: a file that cannot be removed is reported and
//!   the rest are still removed

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod job;
pub mod merger;

pub use job::{run_job, JobReport};
