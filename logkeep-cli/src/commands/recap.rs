//! `recap` command handler
//!
//! Renders the aggregated warning/error summary: one block per file
//! with its component breakdown and totals, then a grand-total row.
//! Files with nothing to report still appear with a totals row;
//! unreadable files are flagged instead of dropped.

use anyhow::Result;
use colored::*;
use logkeep_core::recap::{FileRecap, FileTally, recap};

use crate::config::Config;
use crate::logs;

/// Summarize warnings and errors across every log file
pub fn show_recap(config: &Config) -> Result<()> {
    let files = logs::list_log_files(&config.logs_dir)?;

    if files.is_empty() {
        println!("{}", "No log files found.".yellow());
        return Ok(());
    }

    let report = recap(files.iter().map(|info| info.path.clone()));

    println!("{}", "Recap".bold());
    println!("{}", "─".repeat(64).dimmed());

    for file in &report.files {
        match file {
            FileRecap::Tallied(tally) => print_file_tally(tally),
            FileRecap::Unreadable { name, error } => {
                println!("  {} {}", "▸".cyan(), name);
                println!("    {}", format!("unreadable: {error}").red());
            }
        }
        println!();
    }

    println!("{}", "─".repeat(64).dimmed());
    println!(
        "  {}  warnings: {}  errors: {}",
        "Total".bold(),
        warning_count(report.total_warnings),
        error_count(report.total_errors),
    );

    Ok(())
}

fn print_file_tally(tally: &FileTally) {
    println!("  {} {}", "▸".cyan(), tally.name);
    for component in &tally.components {
        println!(
            "    {} warnings: {}  errors: {}",
            format!("{:<20}", component.component).dimmed(),
            warning_count(component.warnings),
            error_count(component.errors),
        );
    }
    println!(
        "    {:<20} warnings: {}  errors: {}",
        "total",
        warning_count(tally.warnings),
        error_count(tally.errors),
    );
}

fn warning_count(count: u64) -> ColoredString {
    let text = count.to_string();
    if count > 0 { text.yellow() } else { text.dimmed() }
}

fn error_count(count: u64) -> ColoredString {
    let text = count.to_string();
    if count > 0 { text.red() } else { text.dimmed() }
}
