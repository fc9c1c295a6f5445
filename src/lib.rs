//! Argot - declarative command routing with shell completion
//!
//! Commands are registered with a small pattern DSL (`init`,
//! `test:<command>`, `use [name]`, `config:set [...configs]`) plus named
//! options. A `Cli` parses argv against the first matching command and
//! predicts tab-completion candidates for a partly typed command line.

// Public modules
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logger;
pub mod parser;
pub mod pattern;
pub mod runner;

// Re-export commonly used types
pub use cli::Cli;
pub use command::{Command, OptionKind, OptionParams, OptionValue, ParsedInput};
pub use error::{ArgotError, CliError, PatternError, Result};
pub use logger::{Logger, Verbosity};

/// Current version of Argot
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
