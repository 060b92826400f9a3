//! Logging session and per-component loggers
//!
//! A [`LoggingSession`] is constructed once by whoever bootstraps the
//! process and threaded explicitly to every component that needs a
//! logger. It owns the shared state a process-wide logging facility
//! needs: the resolved session log file path, the enabled flags, and
//! the widest component name seen so far (which drives console column
//! alignment). There is no global or static state.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use colored::Colorize;

use crate::codec;
use crate::error::Result;
use crate::event::{LogEvent, Severity};

/// External configuration consumed when a session is created
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding session log files
    pub logs_dir: PathBuf,
    /// Explicit log file name; `None` derives one from the session start time
    pub log_file: Option<String>,
    /// When false, `debug` calls are complete no-ops
    pub debug_enabled: bool,
    /// When false, nothing is written to the log file
    pub file_logging_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            log_file: None,
            debug_enabled: false,
            file_logging_enabled: false,
        }
    }
}

impl SessionConfig {
    /// Creates configuration from environment variables
    ///
    /// Recognized variables:
    /// - LOGKEEP_LOGS_DIR (optional, default: "logs")
    /// - LOGKEEP_LOG_FILE (optional, default: derived from start time)
    /// - LOGKEEP_DEBUG (optional, "1"/"true" enables debug output)
    /// - LOGKEEP_FILE_LOGGING (optional, "1"/"true" enables the log file)
    pub fn from_env() -> Self {
        Self {
            logs_dir: std::env::var("LOGKEEP_LOGS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs")),
            log_file: std::env::var("LOGKEEP_LOG_FILE")
                .ok()
                .filter(|name| !name.is_empty()),
            debug_enabled: env_flag("LOGKEEP_DEBUG"),
            file_logging_enabled: env_flag("LOGKEEP_FILE_LOGGING"),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Sink for rendered console lines
///
/// The default sink writes to stdout; tests capture rendering by
/// providing their own implementation.
pub trait ConsoleSink: Send {
    /// Write one rendered line
    fn write_line(&mut self, line: &str);
}

struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

struct SessionState {
    log_file_path: PathBuf,
    debug_enabled: bool,
    file_logging_enabled: bool,
    /// Widest component name registered so far; never shrinks
    max_prefix_len: usize,
    console: Box<dyn ConsoleSink>,
}

/// Shared logging state for one process run
///
/// Cloning is cheap and every clone refers to the same state, so the
/// session can be handed to whichever components need loggers.
#[derive(Clone)]
pub struct LoggingSession {
    state: Arc<Mutex<SessionState>>,
}

impl LoggingSession {
    /// Creates a session that renders to stdout
    ///
    /// The session log file path is resolved here, exactly once:
    /// `<logs_dir>/<log_file>` when an explicit name is configured,
    /// otherwise `<logs_dir>/<start-timestamp>.log`. The file itself is
    /// created lazily on the first enabled write.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_console(config, Box::new(StdoutSink))
    }

    /// Creates a session with a custom console sink
    pub fn with_console(config: SessionConfig, console: Box<dyn ConsoleSink>) -> Self {
        let file_name = config.log_file.unwrap_or_else(|| {
            format!("{}.log", Utc::now().format(codec::TIMESTAMP_FORMAT))
        });
        let log_file_path = config.logs_dir.join(file_name);

        Self {
            state: Arc::new(Mutex::new(SessionState {
                log_file_path,
                debug_enabled: config.debug_enabled,
                file_logging_enabled: config.file_logging_enabled,
                max_prefix_len: 0,
                console,
            })),
        }
    }

    /// Creates a logger for `component`
    ///
    /// Registers the component name against the session's alignment
    /// tracker; the console column widens to fit the longest name seen.
    pub fn logger(&self, component: impl Into<String>) -> Logger {
        let component = component.into();
        {
            let mut state = self.lock();
            if state.max_prefix_len < component.len() {
                state.max_prefix_len = component.len();
            }
        }
        Logger {
            session: self.clone(),
            component,
        }
    }

    /// The resolved session log file path
    pub fn log_file_path(&self) -> PathBuf {
        self.lock().log_file_path.clone()
    }

    /// Whether file logging is currently active
    ///
    /// Starts as configured and turns off permanently after the first
    /// failed append.
    pub fn file_logging_enabled(&self) -> bool {
        self.lock().file_logging_enabled
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Per-component logging handle
pub struct Logger {
    session: LoggingSession,
    component: String,
}

impl Logger {
    /// The component label this logger stamps on every event
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Log a message at INFO
    pub fn log(&self, message: &str) -> Result<()> {
        self.emit(Severity::Info, message)
    }

    /// Log a message at DEBUG; a no-op unless debug is enabled
    pub fn debug(&self, message: &str) -> Result<()> {
        if !self.session.lock().debug_enabled {
            return Ok(());
        }
        self.emit(Severity::Debug, message)
    }

    /// Log a message at WARNING
    pub fn warning(&self, message: &str) -> Result<()> {
        self.emit(Severity::Warning, message)
    }

    /// Log a message at ERROR
    pub fn error(&self, message: &str) -> Result<()> {
        self.emit(Severity::Error, message)
    }

    /// Renders to the console, then appends to the log file when enabled
    ///
    /// An append failure propagates once and disables file logging for
    /// the rest of the session, so one broken path cannot fail every
    /// subsequent call. Console output is unaffected.
    fn emit(&self, severity: Severity, message: &str) -> Result<()> {
        let event = LogEvent {
            timestamp: Utc::now(),
            severity,
            component: self.component.clone(),
            message: message.to_string(),
        };

        let mut state = self.session.lock();
        let rendered = render_console_line(&event, state.max_prefix_len);
        state.console.write_line(&rendered);

        if state.file_logging_enabled {
            if let Err(err) = append_line(&state.log_file_path, &codec::encode(&event)) {
                state.file_logging_enabled = false;
                return Err(err.into());
            }
        }

        Ok(())
    }
}

/// Appends one already-encoded line; never truncates prior content
///
/// The file is created on first use, but a missing logs directory is an
/// error, not something to silently create.
fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}

fn render_console_line(event: &LogEvent, max_prefix_len: usize) -> String {
    let level = event.severity.as_str();
    let level_colored = match event.severity {
        Severity::Debug => level.green(),
        Severity::Info => level.blue(),
        Severity::Warning => level.yellow(),
        Severity::Error => level.red(),
    };
    let level_pad = " ".repeat(8usize.saturating_sub(level.len()));
    let prefix_pad = " ".repeat(max_prefix_len.saturating_sub(event.component.len()) + 1);

    format!(
        "{} [{}]{}{}{}- {}",
        format!("[{}]", event.timestamp.format(codec::TIMESTAMP_FORMAT)).dimmed(),
        level_colored,
        level_pad,
        event.component.dimmed(),
        prefix_pad,
        event.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    // Console sink that records rendered lines for assertions
    struct CaptureSink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl CaptureSink {
        fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
            let lines = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    lines: lines.clone(),
                },
                lines,
            )
        }
    }

    impl ConsoleSink for CaptureSink {
        fn write_line(&mut self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    fn console_session(config: SessionConfig) -> (LoggingSession, Arc<Mutex<Vec<String>>>) {
        colored::control::set_override(false);
        let (sink, lines) = CaptureSink::new();
        (LoggingSession::with_console(config, Box::new(sink)), lines)
    }

    #[test]
    fn test_explicit_log_file_name_is_used() {
        let config = SessionConfig {
            logs_dir: PathBuf::from("logs"),
            log_file: Some("session.log".to_string()),
            ..SessionConfig::default()
        };
        let session = LoggingSession::new(config);
        assert_eq!(session.log_file_path(), PathBuf::from("logs/session.log"));
    }

    #[test]
    fn test_auto_generated_name_has_log_extension() {
        let session = LoggingSession::new(SessionConfig::default());
        let path = session.log_file_path();
        assert_eq!(path.extension().unwrap(), "log");
        assert!(path.starts_with("logs"));
    }

    #[test]
    fn test_path_resolved_once_per_session() {
        let session = LoggingSession::new(SessionConfig::default());
        let first = session.log_file_path();
        let _net = session.logger("Net");
        let _db = session.logger("DB");
        assert_eq!(session.log_file_path(), first);
    }

    #[test]
    fn test_console_rendering_and_alignment() {
        let (session, lines) = console_session(SessionConfig::default());
        let net = session.logger("Net");
        let _database = session.logger("Database");

        net.log("started").unwrap();

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        // "Database" is 8 wide, so "Net" gets 5 + 1 padding spaces.
        assert!(lines[0].contains("[INFO]    Net      - started"), "{}", lines[0]);
    }

    #[test]
    fn test_alignment_tracker_never_shrinks() {
        let (session, lines) = console_session(SessionConfig::default());
        let _database = session.logger("Database");
        let net = session.logger("Net");

        net.warning("retry").unwrap();

        let lines = lines.lock().unwrap();
        assert!(lines[0].contains("Net      - retry"), "{}", lines[0]);
    }

    #[test]
    fn test_debug_is_noop_unless_enabled() {
        let (session, lines) = console_session(SessionConfig::default());
        let logger = session.logger("Net");

        logger.debug("invisible").unwrap();
        assert!(lines.lock().unwrap().is_empty());

        let (session, lines) = console_session(SessionConfig {
            debug_enabled: true,
            ..SessionConfig::default()
        });
        let logger = session.logger("Net");
        logger.debug("visible").unwrap();
        assert!(lines.lock().unwrap()[0].contains("[DEBUG]"));
    }

    #[test]
    fn test_file_logging_appends_encoded_lines() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            logs_dir: dir.path().to_path_buf(),
            log_file: Some("run.log".to_string()),
            file_logging_enabled: true,
            ..SessionConfig::default()
        };
        let (session, _lines) = console_session(config);
        let logger = session.logger("Net");

        logger.log("started").unwrap();
        logger.error("boom").unwrap();

        let contents = std::fs::read_to_string(dir.path().join("run.log")).unwrap();
        let mut lines = contents.lines();
        let first = lines.next().unwrap();
        let second = lines.next().unwrap();
        assert!(first.starts_with('#') && first.ends_with("[INFO] Net - started"), "{first}");
        assert!(second.ends_with("[ERROR] Net - boom"), "{second}");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_file_logging_disabled_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            logs_dir: dir.path().to_path_buf(),
            log_file: Some("run.log".to_string()),
            ..SessionConfig::default()
        };
        let (session, _lines) = console_session(config);
        session.logger("Net").log("console only").unwrap();

        assert!(!dir.path().join("run.log").exists());
    }

    #[test]
    fn test_append_failure_propagates_once_then_disables() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            logs_dir: dir.path().join("missing"),
            log_file: Some("run.log".to_string()),
            file_logging_enabled: true,
            ..SessionConfig::default()
        };
        let (session, lines) = console_session(config);
        let logger = session.logger("Net");

        assert!(logger.log("first").is_err());
        assert!(!session.file_logging_enabled());

        // Subsequent calls succeed as console-only.
        logger.log("second").unwrap();
        assert_eq!(lines.lock().unwrap().len(), 2);
    }
}
