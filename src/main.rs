use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use zipmerge::cli::args::Cli;
use zipmerge::cli::output;
use zipmerge::common::config::{Config, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Held until exit so buffered log lines reach the file
    let _guard = init_logging(&cli)?;

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = cli.apply_overrides(Config::load_from(&config_path)?);

    let dir = match cli.dir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let show_progress = config.output_format == OutputFormat::Human;
    let report = zipmerge::run_job(&dir, &config, show_progress)?;

    match config.output_format {
        OutputFormat::Human => output::print_job_report(&report),
        OutputFormat::Json => output::print_job_json(&report)?,
        OutputFormat::Quiet => output::print_job_quiet(&report),
    }

    Ok(())
}

/// Install the stderr subscriber, plus a file layer when `--log-file` is set.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let default_directive = if cli.verbose {
        "zipmerge=debug"
    } else {
        "zipmerge=error"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_file {
        Some(ref path) => {
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log dir: {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?
        .to_string_lossy()
        .to_string();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
