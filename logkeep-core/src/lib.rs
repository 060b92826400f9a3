//! Logkeep Core
//!
//! Session logging facility and log-file inspection primitives.
//!
//! This crate contains:
//! - Line codec: the fixed text encoding written to session log files
//! - Logging session: per-component console + file loggers
//! - Reader/filter: severity-filtered streaming over one log file
//! - Recap: warning/error aggregation across log files

pub mod codec;
pub mod error;
pub mod event;
pub mod reader;
pub mod recap;
pub mod session;
