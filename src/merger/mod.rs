pub mod discover;
pub mod extract;
pub mod merge;
pub mod processor;

pub use extract::extract_csv_entries;
pub use merge::{merge_csv_files, MergeReport};
pub use processor::{process_archives_to_csv, ProcessReport};
