//! Failure reporting collaborator and tracing setup
//!
//! Expected failures (unmapped identifiers, unknown syntaxes, I/O errors)
//! are reported to a [`Logger`] instead of being returned to the caller.

use std::error::Error;
use std::sync::Mutex;

/// Sink for non-fatal diagnostics
pub trait Logger {
    fn error(&self, message: &str);

    fn warning(&self, message: &str);

    fn info(&self, message: &str);

    /// Report an error together with its source chain
    fn error_from(&self, error: &dyn Error) {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        self.error(&message);
    }
}

/// Forwards every message to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Severity of a buffered message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps messages in memory so callers can inspect them
#[derive(Debug, Default)]
pub struct BufferedLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferedLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: LogLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message)
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(LogLevel::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.entries().iter().any(|entry| entry.level == LogLevel::Error)
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Logger for BufferedLogger {
    fn error(&self, message: &str) {
        tracing::debug!("buffered error: {}", message);
        self.push(LogLevel::Error, message);
    }

    fn warning(&self, message: &str) {
        self.push(LogLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`
///
/// Does nothing when a global subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_buffered_logger_keeps_levels() {
        let logger = BufferedLogger::new();
        logger.error("e");
        logger.warning("w");
        logger.info("i");
        assert_eq!(logger.errors(), vec!["e".to_string()]);
        assert_eq!(logger.messages(LogLevel::Warning), vec!["w".to_string()]);
        assert_eq!(logger.entries().len(), 3);
        logger.clear();
        assert!(!logger.has_errors());
    }

    #[test]
    fn test_error_from_includes_sources() {
        let logger = BufferedLogger::new();
        let error = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        logger.error_from(&error);
        assert_eq!(logger.errors(), vec!["outer: missing".to_string()]);
    }

    #[test]
    fn test_init_tracing_is_repeatable() {
        init_tracing();
        init_tracing();
    }
}
