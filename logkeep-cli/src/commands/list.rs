//! `list` command handler

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::*;

use crate::config::Config;
use crate::logs;

/// List all log files with their size and modification time
pub fn list_files(config: &Config) -> Result<()> {
    let files = logs::list_log_files(&config.logs_dir)?;

    if files.is_empty() {
        println!("{}", "No log files found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} log file(s):", files.len()).bold());
    println!();
    for info in files {
        let modified: DateTime<Local> = info.modified.into();
        println!("  {} {}", "▸".cyan(), info.name);
        println!("    Size:     {}", logs::human_size(info.size).dimmed());
        println!(
            "    Modified: {}",
            modified.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
        println!();
    }

    Ok(())
}
