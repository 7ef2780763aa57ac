use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use chrono::Local;

pub const DEFAULT_LOG_FILE: &str = "launcher_logs.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

// Define log levels
pub enum LogLevel {
    INFO,
    WARNING,
    ERROR,
    ROUND,
    CRITICAL,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::INFO => "INFO",
            LogLevel::WARNING => "WARNING",
            LogLevel::ERROR => "ERROR",
            LogLevel::ROUND => "ROUND",
            LogLevel::CRITICAL => "CRITICAL",
        }
    }
}

pub struct Logger {
    file: File,
}

impl Logger {
    // Create a new logger that appends to the specified file
    pub fn new(log_path: &Path) -> Result<Self, std::io::Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Logger { file })
    }

    // Write a log entry with the given level and message
    pub fn log(&mut self, level: LogLevel, message: &str) -> Result<(), std::io::Error> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let log_entry = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);

        self.file.write_all(log_entry.as_bytes())?;
        self.file.flush()?;

        Ok(())
    }
}

// Point the logger at a different file. Only the first call wins.
pub fn set_log_path(path: PathBuf) -> bool {
    LOG_PATH.set(path).is_ok()
}

fn log_path() -> &'static Path {
    LOG_PATH.get_or_init(|| PathBuf::from(DEFAULT_LOG_FILE))
}

fn write(level: LogLevel, message: &str) {
    if let Ok(mut logger) = Logger::new(log_path()) {
        let _ = logger.log(level, message);
    }
}

// Public functions to log at different levels
pub fn info(message: &str) {
    write(LogLevel::INFO, message);
}

pub fn warning(message: &str) {
    write(LogLevel::WARNING, message);
}

pub fn error(message: &str) {
    write(LogLevel::ERROR, message);
}

pub fn round(message: &str) {
    write(LogLevel::ROUND, message);
}

pub fn critical(message: &str) {
    write(LogLevel::CRITICAL, message);
}
