use clap::Parser;
use std::path::PathBuf;

use crate::common::config::{Config, OutputFormat};

/// zipmerge — merge the CSV files inside zip archives into one file
#[derive(Parser, Debug)]
#[command(
    name = "zipmerge",
    version,
    about = "Extract CSV files from zip archives and merge them into one CSV",
    long_about = "zipmerge extracts every CSV inside the zip archives of a directory,\n\
                   concatenates all CSVs found there into merged_data.csv (one header row),\n\
                   then removes the archives and the extracted CSVs.",
    after_help = "EXAMPLES:\n  \
        zipmerge                               Merge archives in the current directory\n  \
        zipmerge ~/Downloads/reports           Merge archives in another directory\n  \
        zipmerge --keep                        Merge but keep archives and extracted CSVs\n  \
        zipmerge --output all.csv              Write the merged file as all.csv\n  \
        zipmerge --format json                 Print the run report as JSON"
)]
pub struct Cli {
    /// Directory containing the zip archives (defaults to the current directory)
    #[arg(env = "ZIPMERGE_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// File name of the merged CSV
    #[arg(long, short, value_name = "NAME")]
    pub output: Option<String>,

    /// Keep archives and extracted CSVs after merging
    #[arg(long, short)]
    pub keep: bool,

    /// Config file to load
    #[arg(long, env = "ZIPMERGE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(ref name) = self.output {
            config.output_name = name.clone();
        }
        if self.keep {
            config.cleanup = false;
        }
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if self.quiet {
            config.output_format = OutputFormat::Quiet;
        }
        config
    }
}
