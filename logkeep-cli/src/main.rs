//! Logkeep CLI
//!
//! Command-line viewer for logkeep session log files.

mod commands;
mod config;
mod logs;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logkeep")]
#[command(about = "Inspect logkeep session log files", long_about = None)]
struct Cli {
    /// Directory holding session log files
    #[arg(long, env = "LOGKEEP_LOGS_DIR", default_value = "logs")]
    logs_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        logs_dir: cli.logs_dir,
    };

    match cli.command {
        Some(command) => handle_command(command, &config),
        None => {
            commands::print_welcome();
            Ok(())
        }
    }
}
