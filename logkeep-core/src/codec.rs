//! Line codec for the on-disk log format
//!
//! Wire format, UTF-8, one event per line:
//!
//! ```text
//! #<YYYY-MM-DD_HH-MM-SS> [<SEVERITY>] <component> - <message>\n
//! ```
//!
//! Any line whose first character is not the marker is a continuation
//! line and belongs, for display purposes, to the preceding event.
//!
//! The ` - ` separator is written without escaping. A message containing
//! the separator decodes correctly (the first occurrence after the
//! component wins), but a component containing it does not. That
//! ambiguity is part of the format and is kept for compatibility with
//! existing log files.

use chrono::NaiveDateTime;

use crate::error::{LogError, Result};
use crate::event::LogEvent;

/// First character of every event line
pub const LINE_MARKER: char = '#';

/// Separator between the component and the message
pub const FIELD_SEPARATOR: &str = " - ";

/// Timestamp layout, 19 characters, second granularity
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Outcome of decoding one physical line
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedLine {
    /// The line starts an event
    Event(LogEvent),
    /// Raw text belonging to the previous event, newline stripped
    Continuation(String),
}

/// Encode an event as one wire-format line, trailing newline included
pub fn encode(event: &LogEvent) -> String {
    format!(
        "{}{} [{}] {}{}{}\n",
        LINE_MARKER,
        event.timestamp.format(TIMESTAMP_FORMAT),
        event.severity,
        event.component,
        FIELD_SEPARATOR,
        event.message,
    )
}

/// Decode one physical line
///
/// Lines not starting with [`LINE_MARKER`] are continuation lines and
/// always decode successfully. A line that does start with the marker
/// must carry a valid timestamp, a bracketed known severity, a component
/// token, and the field separator; anything else is an error. Fields are
/// located by scanning, not by fixed offsets, so minor spacing drift in
/// hand-edited files still decodes.
///
/// # Errors
/// [`LogError::MalformedLine`] when a field cannot be extracted,
/// [`LogError::UnknownSeverity`] when the bracketed token is not a known
/// severity.
pub fn decode(line: &str) -> Result<DecodedLine> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let Some(rest) = line.strip_prefix(LINE_MARKER) else {
        return Ok(DecodedLine::Continuation(line.to_string()));
    };

    let (timestamp_token, rest) = rest
        .split_once(' ')
        .ok_or_else(|| LogError::malformed(line, "no fields after timestamp"))?;
    let timestamp = NaiveDateTime::parse_from_str(timestamp_token, TIMESTAMP_FORMAT)
        .map_err(|_| LogError::malformed(line, "invalid timestamp"))?
        .and_utc();

    let rest = rest
        .trim_start()
        .strip_prefix('[')
        .ok_or_else(|| LogError::malformed(line, "missing severity bracket"))?;
    let (severity_token, rest) = rest
        .split_once(']')
        .ok_or_else(|| LogError::malformed(line, "unterminated severity bracket"))?;
    let severity = severity_token.parse()?;

    let (before_separator, message) = rest
        .split_once(FIELD_SEPARATOR)
        .ok_or_else(|| LogError::malformed(line, "missing field separator"))?;
    let component = before_separator
        .split_whitespace()
        .next_back()
        .ok_or_else(|| LogError::malformed(line, "missing component"))?;

    Ok(DecodedLine::Event(LogEvent {
        timestamp,
        severity,
        component: component.to_string(),
        message: message.to_string(),
    }))
}
