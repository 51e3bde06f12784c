/// Structured logging for the seismic analysis pipeline.
///
/// Context-rich logging with source tags and severity levels. Supports
/// console output and an optional file sink for long-running hosts. The
/// pipeline itself only ever logs diagnostics (skipped records, overlap
/// tie-breaks) — nothing here is load-bearing for correctness.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Data Source Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Live USGS feed ingestion.
    LiveFeed,
    /// Historical archive ingestion.
    Archive,
    /// Country attribution index.
    Attribution,
    /// Everything else (startup, settings).
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::LiveFeed => write!(f, "FEED"),
            DataSource::Archive => write!(f, "ARCH"),
            DataSource::Attribution => write!(f, "ATTR"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Global logger instance. Uninitialized means logging is a no-op, which
/// keeps library consumers and unit tests quiet by default.
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to emit.
    min_level: LogLevel,
    /// Optional file path for a persistent sink.
    log_file: Option<String>,
}

impl Logger {
    /// Initialize the global logger.
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        *LOGGER.lock().unwrap() = Some(Logger {
            min_level,
            log_file,
        });
    }

    fn log(&self, level: LogLevel, source: DataSource, context: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let context_part = context.map(|c| format!(" [{}]", c)).unwrap_or_default();
        let entry = format!(
            "{} {} {}{}: {}",
            timestamp, level, source, context_part, message
        );

        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", entry),
            LogLevel::Info | LogLevel::Debug => println!("{}", entry),
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger.
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

/// Log a general informational message.
pub fn info(source: DataSource, context: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, source, context, message);
    }
}

/// Log a warning message.
pub fn warn(source: DataSource, context: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, source, context, message);
    }
}

/// Log an error message.
pub fn error(source: DataSource, context: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, source, context, message);
    }
}

/// Log a debug message.
pub fn debug(source: DataSource, context: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, source, context, message);
    }
}

// ---------------------------------------------------------------------------
// Batch Summary Logging
// ---------------------------------------------------------------------------

/// Log the outcome of normalizing one raw record batch.
///
/// Severity scales with damage: a clean batch is informational, a batch
/// with rejects is a warning, a batch where nothing survived is an error.
pub fn log_batch_summary(
    source: DataSource,
    accepted: usize,
    skipped: usize,
    duplicates: usize,
) {
    let total = accepted + skipped + duplicates;
    let message = format!(
        "Normalization complete: {}/{} accepted, {} skipped, {} duplicates",
        accepted, total, skipped, duplicates
    );

    if skipped == 0 {
        info(source, None, &message);
    } else if accepted == 0 {
        error(source, None, &message);
    } else {
        warn(source, None, &message);
    }
}
