//! `log` command handler
//!
//! Severity-filtered display of one log file. Event lines are
//! re-rendered with color; continuation lines pass through verbatim;
//! lines that fail to decode are skipped with a dimmed notice.

use anyhow::{Context, Result, anyhow};
use colored::*;
use logkeep_core::codec::TIMESTAMP_FORMAT;
use logkeep_core::event::{LogEvent, Severity, SeverityFilter};
use logkeep_core::reader::{LogLine, filter_log};
use std::path::PathBuf;

use crate::config::Config;
use crate::logs;

/// Show the lines of `file` that match `severity`
pub fn show_log(config: &Config, severity: SeverityFilter, file: &str) -> Result<()> {
    let path = resolve_file(config, file)?;

    let lines = filter_log(&path, severity)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    for line in lines {
        match line {
            Ok(LogLine::Event(event)) => print_event(&event),
            Ok(LogLine::Continuation(text)) => println!("{text}"),
            Err(err) => println!("{}", format!("(skipped unparseable line: {err})").dimmed()),
        }
    }

    Ok(())
}

/// Resolve a file argument to a path, expanding "latest"
fn resolve_file(config: &Config, file: &str) -> Result<PathBuf> {
    if file == "latest" {
        let info = logs::latest(&config.logs_dir)?
            .ok_or_else(|| anyhow!("no log files in {}", config.logs_dir.display()))?;
        Ok(info.path)
    } else {
        Ok(config.logs_dir.join(file))
    }
}

/// Print one event line
fn print_event(event: &LogEvent) {
    let level = event.severity.as_str();
    // Viewer palette; intentionally not the writer's console palette.
    let level_colored = match event.severity {
        Severity::Debug => level.blue(),
        Severity::Info => level.green(),
        Severity::Warning => level.yellow(),
        Severity::Error => level.red(),
    };

    // Long component names are truncated so the column stays at 10 wide.
    let prefix = if event.component.chars().count() > 9 {
        format!("{}... ", event.component.chars().take(6).collect::<String>())
    } else {
        event.component.clone()
    };

    println!(
        "{} [{}]{}{}{}- {}",
        format!("[{}]", event.timestamp.format(TIMESTAMP_FORMAT)).dimmed(),
        level_colored,
        " ".repeat(8usize.saturating_sub(level.len())),
        prefix.dimmed(),
        " ".repeat(10usize.saturating_sub(event.component.chars().count())),
        event.message,
    );
}
