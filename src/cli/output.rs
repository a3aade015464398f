use colored::*;

use crate::cleaner::CleanupReport;
use crate::common::format::{self, format_count, format_path};
use crate::job::JobReport;
use crate::merger::ProcessReport;

/// Print the full run report in human-readable format
pub fn print_job_report(report: &JobReport) {
    print_process_report(&report.process);

    match report.cleanup {
        Some(ref cleanup) => print_cleanup_report(cleanup),
        None => println!(
            "  {} Cleanup skipped, archives and extracted CSVs kept",
            "ℹ".blue()
        ),
    }

    println!();
    println!(
        "  {} Process completed successfully in {}",
        "✓".green(),
        format::format_duration(report.duration_secs).cyan()
    );
    println!();
}

/// Print the extraction and merge summary
pub fn print_process_report(report: &ProcessReport) {
    format::print_header("zipmerge");
    format::print_kv("Directory", &format_path(&report.directory));
    println!();

    match report.output {
        Some(ref output) => {
            println!(
                "  {} Created merged CSV at {} ({}, {})",
                "✓".green(),
                format_path(output).cyan(),
                format_count(report.merge_inputs.len(), "input"),
                format::format_size(report.bytes_written)
            );
            if !report.header_written {
                println!(
                    "  {} First input was empty, merged file has no header row",
                    "⚠".yellow()
                );
            }
        }
        None => {
            println!(
                "  {} No CSV files found, nothing to merge",
                "ℹ".blue()
            );
        }
    }

    for archive in &report.overwritten_entries {
        println!(
            "  {} Entry in {} has the merged file's name, it was overwritten and not merged",
            "⚠".yellow(),
            format_path(archive).yellow()
        );
    }

    println!(
        "  {} Processed {} and {}",
        "→".dimmed(),
        format_count(report.archives.len(), "zip file"),
        format_count(report.merge_inputs.len(), "CSV file")
    );
}

/// Print the cleanup tally and each failure
pub fn print_cleanup_report(report: &CleanupReport) {
    println!(
        "  {} Removed {} during cleanup",
        "🧹",
        format_count(report.removed_count(), "file")
    );

    if !report.failures.is_empty() {
        println!(
            "  {} {}",
            "⚠".yellow(),
            format!("{} could not be removed:", format_count(report.failures.len(), "file"))
                .yellow()
        );
        for failure in &report.failures {
            println!(
                "    {} Error removing {}: {}",
                "→".dimmed(),
                format_path(&failure.path),
                failure.reason.dimmed()
            );
        }
    }
}

/// Print the run report as pretty JSON
pub fn print_job_json(report: &JobReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// One line: archives, CSVs merged, files removed, output path
pub fn print_job_quiet(report: &JobReport) {
    let removed = report
        .cleanup
        .as_ref()
        .map(|c| c.removed_count())
        .unwrap_or(0);
    let output = report
        .process
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "none".to_string());

    println!(
        "{}  {}  {}  {}",
        report.process.archives.len(),
        report.process.merge_inputs.len(),
        removed,
        output
    );
}
