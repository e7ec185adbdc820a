//! Captured log records and the optional forwarding callback

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use soapjpa_core::LogLevel;
use std::sync::atomic::{AtomicU8, Ordering};

/// One log event that passed the sink's level filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Callback invoked for every captured record
///
/// Runs on the thread that emitted the event, so it must be cheap and must
/// not log itself.
pub type LogCallback = fn(&LogRecord);

/// Global sink instance
static LOG_SINK: OnceCell<LogSink> = OnceCell::new();

/// Collects the log records a caller wants to inspect after a run
/// (by default warnings and errors) and optionally forwards them
pub struct LogSink {
    callback: RwLock<Option<LogCallback>>,
    level: AtomicU8,
    records: Mutex<Vec<LogRecord>>,
}

impl LogSink {
    /// Create a sink capturing warnings and errors
    pub fn new() -> Self {
        Self {
            callback: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Warn as u8),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Get the global sink instance
    pub fn global() -> &'static LogSink {
        LOG_SINK.get_or_init(LogSink::new)
    }

    /// Set the forwarding callback
    pub fn set_callback(&self, callback: Option<LogCallback>) {
        *self.callback.write() = callback;
    }

    pub fn callback(&self) -> Option<LogCallback> {
        *self.callback.read()
    }

    /// Set the capture level
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Check if a log level is captured
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Capture a record if its level is enabled
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        let record = LogRecord {
            level,
            target: target.to_string(),
            message: message.to_string(),
        };

        if let Some(callback) = self.callback() {
            callback(&record);
        }

        self.records.lock().push(record);
    }

    /// Number of captured records at exactly `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .count()
    }

    /// Take every captured record, leaving the sink empty
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}
