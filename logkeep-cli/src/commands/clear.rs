//! `clear` command handler

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;
use crate::logs;

/// Delete log files, oldest first; all of them when `count` is `None`
pub fn clear_files(config: &Config, count: Option<usize>) -> Result<()> {
    let deleted = delete_oldest(config, count)?;

    if deleted == 0 {
        println!("{}", "No log files to delete.".yellow());
    } else {
        println!("{}", format!("Deleted {deleted} log file(s).").bold());
    }

    Ok(())
}

fn delete_oldest(config: &Config, count: Option<usize>) -> Result<usize> {
    let files = logs::list_log_files(&config.logs_dir)?;
    let to_delete: Vec<_> = match count {
        Some(n) => files.into_iter().take(n).collect(),
        None => files,
    };

    for info in &to_delete {
        std::fs::remove_file(&info.path)
            .with_context(|| format!("failed to delete {}", info.path.display()))?;
    }

    Ok(to_delete.len())
}
