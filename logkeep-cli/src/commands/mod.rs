//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod clear;
mod list;
mod log;
mod recap;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use logkeep_core::event::SeverityFilter;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show lines from a log file, filtered by severity
    Log {
        /// Severity to show (all, debug, info, warning, error)
        #[arg(short, long, default_value = "all")]
        severity: SeverityFilter,

        /// Log file name, or "latest" for the most recent one
        #[arg(short, long, default_value = "latest")]
        file: String,
    },
    /// List log files with size and modification time
    List,
    /// Summarize warnings and errors across all log files
    Recap,
    /// Delete log files, oldest first; all of them when COUNT is omitted
    Clear {
        /// Number of files to delete
        count: Option<usize>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Log { severity, file } => log::show_log(config, severity, &file),
        Commands::List => list::list_files(config),
        Commands::Recap => recap::show_recap(config),
        Commands::Clear { count } => clear::clear_files(config, count),
    }
}

/// Print the welcome text shown when no command is given
pub fn print_welcome() {
    println!("{}", "logkeep".bold());
    println!("Inspect session log files written by the logkeep logger.");
    println!();
    println!("Commands:");
    println!(
        "  {}    show lines from a log file (-s/--severity, -f/--file)",
        "log".cyan()
    );
    println!("  {}   list log files with size and modification time", "list".cyan());
    println!("  {}  summarize warnings and errors across all files", "recap".cyan());
    println!("  {}  delete log files, oldest first", "clear".cyan());
    println!();
    println!("Run {} for details.", "logkeep --help".dimmed());
}
