//! Rolling Logger
//!
//! A `log` backend that keeps the most recent records in a circular buffer
//! (for in-app diagnostics) and mirrors every record to the browser console
//! on wasm32 or stderr elsewhere.

use std::collections::VecDeque;
use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug)]
pub enum InitError {
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::AlreadyInitialized => write!(f, "logger already initialized"),
            InitError::NotInitialized => write!(f, "logger not initialized"),
        }
    }
}

impl std::error::Error for InitError {}

/// One formatted log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:<5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Fixed-capacity buffer that evicts the oldest entry when full
#[derive(Debug)]
pub struct LogBuffer {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

struct RollingLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<LogBuffer>,
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };

        emit(&self.app_name, &entry);

        self.buffer.lock().push(entry);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(app_name: &str, entry: &LogEntry) {
    let line = format!("[{}] {}", app_name, entry);
    match entry.level {
        Level::Error => web_sys::console::error_1(&line.into()),
        Level::Warn => web_sys::console::warn_1(&line.into()),
        _ => web_sys::console::log_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(app_name: &str, entry: &LogEntry) {
    eprintln!("[{}] {}", app_name, entry);
}

/// Configures the global logger
pub struct LoggerBuilder {
    app_name: String,
    capacity: usize,
    level: LevelFilter,
}

impl LoggerBuilder {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), InitError> {
        if LOGGER.get().is_some() {
            return Err(InitError::AlreadyInitialized);
        }

        let logger = RollingLogger {
            app_name: self.app_name,
            level: self.level,
            buffer: Mutex::new(LogBuffer::new(self.capacity)),
        };

        LOGGER
            .set(logger)
            .map_err(|_| InitError::AlreadyInitialized)?;
        let installed = LOGGER.get().ok_or(InitError::NotInitialized)?;
        log::set_logger(installed).map_err(|_| InitError::AlreadyInitialized)?;
        log::set_max_level(self.level);
        Ok(())
    }
}

pub fn builder(app_name: &str) -> LoggerBuilder {
    LoggerBuilder {
        app_name: app_name.to_string(),
        capacity: DEFAULT_CAPACITY,
        level: LevelFilter::Info,
    }
}

/// Installs the logger with a buffer of `capacity` records at `Info` level
pub fn init_logger(app_name: &str, capacity: usize) -> Result<(), InitError> {
    builder(app_name).capacity(capacity).init()
}

fn installed() -> Result<&'static RollingLogger, InitError> {
    LOGGER.get().ok_or(InitError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), InitError> {
    let logger = installed()?;
    log::info!(target: logger.app_name.as_str(), "{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), InitError> {
    let logger = installed()?;
    log::warn!(target: logger.app_name.as_str(), "{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), InitError> {
    let logger = installed()?;
    log::error!(target: logger.app_name.as_str(), "{}", message);
    Ok(())
}

/// Snapshot of the buffered records, oldest first
pub fn recent() -> Vec<LogEntry> {
    LOGGER
        .get()
        .map(|logger| logger.buffer.lock().entries())
        .unwrap_or_default()
}
