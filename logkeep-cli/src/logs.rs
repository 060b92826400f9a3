//! Filesystem collaborator for the logs directory
//!
//! The viewer only ever reads (or deletes) what this module hands it:
//! an ordered list of log files plus the metadata the `list` command
//! renders.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

/// Metadata for one log file
#[derive(Debug, Clone)]
pub struct LogFileInfo {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

/// Lists log files in name order
///
/// Session files are named by their start timestamp, so name order is
/// chronological order. Subdirectories are skipped.
pub fn list_log_files(dir: &Path) -> Result<Vec<LogFileInfo>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read logs directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let metadata = entry
            .metadata()
            .with_context(|| format!("failed to stat {}", path.display()))?;
        files.push(LogFileInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// The most recent log file, or `None` when the directory is empty
pub fn latest(dir: &Path) -> Result<Option<LogFileInfo>> {
    let mut files = list_log_files(dir)?;
    Ok(files.pop())
}

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Renders a byte count as a human-readable size
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size > 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, SIZE_UNITS[unit])
}
