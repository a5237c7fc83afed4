//! Custom logging module.
//!
//! This module provides a logger implementation that formats log records and
//! forwards them to a bounded buffer shown in the log panel.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Number of log lines kept for display.
///
pub const LOG_CAPACITY: usize = 500;

/// Shared buffer of formatted log lines, newest last.
///
pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

/// Return a new empty log buffer.
///
pub fn log_buffer() -> LogBuffer {
    Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY)))
}

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

/// Logger that captures formatted records into a [`LogBuffer`].
///
pub struct CustomLogger {
    level: LevelFilter,
    buffer: LogBuffer,
}

impl CustomLogger {
    pub fn new(level: LevelFilter, buffer: LogBuffer) -> Self {
        CustomLogger { level, buffer }
    }

    /// Install as the global logger.
    ///
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // A poisoned buffer only loses display lines
        if let Ok(mut buffer) = self.buffer.lock() {
            if buffer.len() == LOG_CAPACITY {
                buffer.pop_front();
            }
            buffer.push_back(format_log(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(level: Level, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder().level(level).args(args).build()
    }

    #[test]
    fn test_filters_by_level() {
        let buffer = log_buffer();
        let logger = CustomLogger::new(LevelFilter::Info, buffer.clone());
        logger.log(&record(Level::Debug, format_args!("hidden")));
        logger.log(&record(Level::Warn, format_args!("shown")));

        let lines = buffer.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].ends_with("shown"));
    }

    #[test]
    fn test_buffer_is_bounded() {
        let buffer = log_buffer();
        let logger = CustomLogger::new(LevelFilter::Trace, buffer.clone());
        for i in 0..LOG_CAPACITY + 5 {
            logger.log(&record(Level::Info, format_args!("line {}", i)));
        }
        let lines = buffer.lock().unwrap();
        assert_eq!(lines.len(), LOG_CAPACITY);
        assert!(lines[0].ends_with("line 5"));
    }
}
