//! Severity levels and the log event model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LogError;

/// Severity of a log event
///
/// Ordered by increasing urgency, but filtering is exact-or-all only;
/// there is no threshold semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// All known severities, in urgency order
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Canonical upper-case token used in the log file format
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    /// Parses a severity token, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| s.eq_ignore_ascii_case(severity.as_str()))
            .ok_or_else(|| LogError::UnknownSeverity(s.to_string()))
    }
}

/// One emitted log message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Emission instant, second granularity on the wire
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub severity: Severity,
    /// Label of the emitting logical unit (the "prefix")
    pub component: String,
    /// Free-form text; may contain the field separator (see codec docs)
    pub message: String,
}

/// Severity filter used by the reader: exact match or everything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityFilter {
    All,
    Exact(Severity),
}

impl SeverityFilter {
    /// Check whether an event of `severity` passes this filter
    pub fn matches(self, severity: Severity) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Exact(wanted) => wanted == severity,
        }
    }
}

impl FromStr for SeverityFilter {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(SeverityFilter::All)
        } else {
            Ok(SeverityFilter::Exact(s.parse()?))
        }
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityFilter::All => f.write_str("ALL"),
            SeverityFilter::Exact(severity) => f.write_str(severity.as_str()),
        }
    }
}
