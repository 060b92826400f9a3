//! Configuration module
//!
//! CLI configuration shared by the command handlers.

use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding session log files
    pub logs_dir: PathBuf,
}
