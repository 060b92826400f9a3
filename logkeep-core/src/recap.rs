//! Warning/error aggregation across log files
//!
//! The recap rolls every WARNING and ERROR event up three ways at once:
//! per component within a file, per file, and across all files. Files
//! that cannot be read (or that contain a line which fails to decode)
//! are reported as such instead of being dropped; the remaining files
//! still aggregate normally.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::codec::{self, DecodedLine};
use crate::error::{LogError, Result};
use crate::event::Severity;

/// Warning/error counts for one component within one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentTally {
    pub component: String,
    pub warnings: u64,
    pub errors: u64,
}

/// Counts for one readable log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTally {
    pub name: String,
    pub warnings: u64,
    pub errors: u64,
    /// Union of the components seen in either category, with explicit
    /// zeros for the missing side. Ordered by first warning seen, then
    /// error-only components by first error seen. Empty when the file
    /// had no warnings or errors at all.
    pub components: Vec<ComponentTally>,
}

/// Aggregation outcome for one file
#[derive(Debug)]
pub enum FileRecap {
    Tallied(FileTally),
    /// The file could not be opened, or a line in it failed to decode
    Unreadable { name: String, error: LogError },
}

impl FileRecap {
    pub fn name(&self) -> &str {
        match self {
            FileRecap::Tallied(tally) => &tally.name,
            FileRecap::Unreadable { name, .. } => name,
        }
    }
}

/// Aggregated warning/error summary across a set of log files
#[derive(Debug, Default)]
pub struct RecapReport {
    /// One entry per supplied file, in supplied order
    pub files: Vec<FileRecap>,
    pub total_warnings: u64,
    pub total_errors: u64,
}

impl RecapReport {
    fn push(&mut self, name: String, outcome: Result<FileTally>) {
        match outcome {
            Ok(tally) => {
                self.total_warnings += tally.warnings;
                self.total_errors += tally.errors;
                self.files.push(FileRecap::Tallied(tally));
            }
            Err(error) => self.files.push(FileRecap::Unreadable { name, error }),
        }
    }
}

/// Aggregates the given files, in the order supplied
///
/// A file that fails to open or decode becomes a
/// [`FileRecap::Unreadable`] entry and contributes nothing to the grand
/// totals; it never aborts the recap.
pub fn recap<I, P>(paths: I) -> RecapReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut report = RecapReport::default();
    for path in paths {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let outcome = File::open(path)
            .map_err(LogError::from)
            .and_then(|file| tally_reader(&name, BufReader::new(file)));
        report.push(name, outcome);
    }
    report
}

/// Tallies one reader's worth of lines
///
/// # Errors
/// Propagates the first read or decode failure; partial counts are
/// discarded so an unreadable file is never half-reported.
pub fn tally_reader<R: BufRead>(name: &str, reader: R) -> Result<FileTally> {
    let mut warnings: Vec<(String, u64)> = Vec::new();
    let mut errors: Vec<(String, u64)> = Vec::new();
    let mut total_warnings = 0;
    let mut total_errors = 0;

    for line in reader.lines() {
        let line = line?;
        match codec::decode(&line)? {
            DecodedLine::Event(event) => match event.severity {
                Severity::Warning => {
                    bump(&mut warnings, &event.component);
                    total_warnings += 1;
                }
                Severity::Error => {
                    bump(&mut errors, &event.component);
                    total_errors += 1;
                }
                Severity::Debug | Severity::Info => {}
            },
            DecodedLine::Continuation(_) => {}
        }
    }

    // Merge into the union breakdown: warning components keep their
    // first-seen order, error-only components follow.
    let mut components: Vec<ComponentTally> = warnings
        .into_iter()
        .map(|(component, count)| ComponentTally {
            component,
            warnings: count,
            errors: 0,
        })
        .collect();
    for (component, count) in errors {
        match components
            .iter_mut()
            .find(|tally| tally.component == component)
        {
            Some(tally) => tally.errors = count,
            None => components.push(ComponentTally {
                component,
                warnings: 0,
                errors: count,
            }),
        }
    }

    Ok(FileTally {
        name: name.to_string(),
        warnings: total_warnings,
        errors: total_errors,
        components,
    })
}

fn bump(counts: &mut Vec<(String, u64)>, component: &str) {
    match counts
        .iter_mut()
        .find(|(name, _)| name == component)
    {
        Some((_, count)) => *count += 1,
        None => counts.push((component.to_string(), 1)),
    }
}
