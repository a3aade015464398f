pub mod purger;

pub use purger::{cleanup_files, CleanupFailure, CleanupReport};
