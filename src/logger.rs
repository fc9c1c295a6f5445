//! Logging capability
//!
//! A `Logger` is built by the caller and handed to the router and its
//! commands. It prints `[LEVEL] message` lines to stderr gated by
//! verbosity, or appends them to a log file.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Environment variable that disables logging when set to `disable`
pub const LOG_ENV: &str = "ARGOT_LOG";

/// Environment variable naming a log file to append to
pub const LOG_FILE_ENV: &str = "ARGOT_LOG_FILE";

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
}

/// Injected logger
#[derive(Debug, Clone)]
pub struct Logger {
    enabled: bool,
    verbosity: Verbosity,
    sink: LogSink,
}

impl Logger {
    /// Create an enabled stderr logger
    pub fn new(verbosity: Verbosity) -> Self {
        Logger {
            enabled: true,
            verbosity,
            sink: LogSink::Stderr,
        }
    }

    /// A logger that drops everything
    pub fn disabled() -> Self {
        Logger {
            enabled: false,
            verbosity: Verbosity::Silent,
            sink: LogSink::Stderr,
        }
    }

    /// Append to a file instead of stderr
    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.sink = LogSink::File(path);
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.verbosity > Verbosity::Silent
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Log an error message
    pub fn error(&self, message: &str) {
        self.log(Verbosity::Quiet, "ERROR", message);
    }

    /// Log a warning message
    pub fn warn(&self, message: &str) {
        self.log(Verbosity::Normal, "WARN", message);
    }

    /// Log an info message
    pub fn info(&self, message: &str) {
        self.log(Verbosity::Normal, "INFO", message);
    }

    /// Log a debug message (only in verbose mode)
    pub fn debug(&self, message: &str) {
        self.log(Verbosity::Verbose, "DEBUG", message);
    }

    fn log(&self, min: Verbosity, level: &str, message: &str) {
        if !self.enabled || self.verbosity < min {
            return;
        }

        match &self.sink {
            LogSink::Stderr => eprintln!("[{}] {}", level, message),
            LogSink::File(path) => {
                // best-effort
                if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                    let _ = writeln!(file, "[{}] {}", level, message);
                }
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Logger settings resolved from the environment and CLI flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub verbosity: Verbosity,
    pub file: Option<PathBuf>,
}

impl LoggerConfig {
    /// Read `ARGOT_LOG` and `ARGOT_LOG_FILE`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup(LOG_ENV).map_or(true, |v| v != "disable");
        let file = lookup(LOG_FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        LoggerConfig {
            enabled,
            verbosity: Verbosity::Normal,
            file,
        }
    }

    /// Override verbosity (from `-q`, `-s`, `-v`)
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn build(&self) -> Logger {
        if !self.enabled {
            return Logger::disabled();
        }

        let logger = Logger::new(self.verbosity);
        match &self.file {
            Some(path) => logger.with_file(path.clone()),
            None => logger,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: true,
            verbosity: Verbosity::Normal,
            file: None,
        }
    }
}
