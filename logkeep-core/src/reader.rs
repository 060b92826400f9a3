//! Streaming, severity-filtered reading of one log file
//!
//! The filter is a single forward pass in file order. Nothing is
//! buffered beyond the current line, so arbitrarily large files stream
//! fine. Continuation lines inherit the visibility of the most recent
//! event line, which is how multi-line output (stack traces, command
//! output) stays attached to its event when filtering.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::codec::{self, DecodedLine};
use crate::error::Result;
use crate::event::{LogEvent, Severity, SeverityFilter};

/// A line surfaced by the filter
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    /// A parsed event line
    Event(LogEvent),
    /// Raw continuation text, rendered verbatim
    Continuation(String),
}

/// Iterator over the lines of a log that pass a severity filter
///
/// Yields `Err` items for lines that claim to start an event but fail
/// to decode; iteration continues afterwards, so callers choose between
/// skip-and-continue (the viewer) and abort-on-first-error (strict
/// validation).
#[derive(Debug)]
pub struct FilteredLines<R> {
    lines: Lines<R>,
    filter: SeverityFilter,
    /// Severity of the most recently decoded event, owned by any
    /// continuation lines that follow
    current: Option<Severity>,
}

impl<R: BufRead> FilteredLines<R> {
    /// Filters `reader` by `filter`
    pub fn new(reader: R, filter: SeverityFilter) -> Self {
        Self {
            lines: reader.lines(),
            filter,
            current: None,
        }
    }
}

impl<R: BufRead> Iterator for FilteredLines<R> {
    type Item = Result<LogLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };

            match codec::decode(&line) {
                Ok(DecodedLine::Event(event)) => {
                    self.current = Some(event.severity);
                    if self.filter.matches(event.severity) {
                        return Some(Ok(LogLine::Event(event)));
                    }
                }
                Ok(DecodedLine::Continuation(text)) => {
                    // A leading continuation line with no parent event is
                    // only visible when nothing is filtered out.
                    let visible = match self.filter {
                        SeverityFilter::All => true,
                        SeverityFilter::Exact(wanted) => self.current == Some(wanted),
                    };
                    if visible {
                        return Some(Ok(LogLine::Continuation(text)));
                    }
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Opens `path` and streams the lines matching `filter`, in file order
///
/// # Errors
/// Fails when the file cannot be opened; per-line decode failures are
/// surfaced as iterator items instead.
pub fn filter_log(
    path: impl AsRef<Path>,
    filter: SeverityFilter,
) -> Result<FilteredLines<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(FilteredLines::new(BufReader::new(file), filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogError;
    use std::io::Cursor;

    const SAMPLE: &str = "#2024-01-01_00-00-00 [INFO] Net - started\n\
                          #2024-01-01_00-00-01 [WARNING] Net - retry\n\
                          #2024-01-01_00-00-02 [ERROR] DB - timeout\n\
                          connection trace follows\n";

    fn collect(input: &str, filter: SeverityFilter) -> Vec<LogLine> {
        FilteredLines::new(Cursor::new(input.to_string()), filter)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_all_returns_every_line_in_order() {
        let lines = collect(SAMPLE, SeverityFilter::All);
        assert_eq!(lines.len(), 4);
        let LogLine::Event(first) = &lines[0] else {
            panic!("expected an event");
        };
        assert_eq!(first.message, "started");
        assert_eq!(
            lines[3],
            LogLine::Continuation("connection trace follows".to_string())
        );
    }

    #[test]
    fn test_exact_filter_returns_only_matching_events() {
        let lines = collect(SAMPLE, SeverityFilter::Exact(Severity::Warning));
        assert_eq!(lines.len(), 1);
        let LogLine::Event(event) = &lines[0] else {
            panic!("expected an event");
        };
        assert_eq!(event.message, "retry");
        assert_eq!(event.component, "Net");
    }

    #[test]
    fn test_continuation_inherits_parent_visibility() {
        // The trace line follows the ERROR event, so it shows up under
        // ERROR but not under WARNING.
        let errors = collect(SAMPLE, SeverityFilter::Exact(Severity::Error));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[1],
            LogLine::Continuation("connection trace follows".to_string())
        );

        let warnings = collect(SAMPLE, SeverityFilter::Exact(Severity::Warning));
        assert!(
            warnings
                .iter()
                .all(|line| !matches!(line, LogLine::Continuation(_)))
        );
    }

    #[test]
    fn test_leading_continuation_only_visible_under_all() {
        let input = "orphan text\n#2024-01-01_00-00-00 [INFO] Net - started\n";
        assert_eq!(collect(input, SeverityFilter::All).len(), 2);
        assert_eq!(
            collect(input, SeverityFilter::Exact(Severity::Info)).len(),
            1
        );
    }

    #[test]
    fn test_exact_filters_are_subsequences_of_all() {
        let all = collect(SAMPLE, SeverityFilter::All);
        for severity in Severity::ALL {
            let filtered = collect(SAMPLE, SeverityFilter::Exact(severity));
            let mut remaining = all.iter();
            for line in &filtered {
                assert!(
                    remaining.any(|candidate| candidate == line),
                    "{line:?} not in order within the unfiltered output"
                );
            }
        }
    }

    #[test]
    fn test_malformed_line_yields_error_and_iteration_continues() {
        let input = "#2024-01-01_00-00-00 [INFO Net - bad bracket\n\
                     #2024-01-01_00-00-01 [INFO] Net - fine\n";
        let mut lines = FilteredLines::new(Cursor::new(input.to_string()), SeverityFilter::All);

        let err = lines.next().unwrap().unwrap_err();
        assert!(matches!(err, LogError::MalformedLine { .. }));

        let LogLine::Event(event) = lines.next().unwrap().unwrap() else {
            panic!("expected an event");
        };
        assert_eq!(event.message, "fine");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_filter_log_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = filter_log(dir.path().join("absent.log"), SeverityFilter::All).unwrap_err();
        assert!(matches!(err, LogError::Io(_)));
    }
}
