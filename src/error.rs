//! Error types for Argot

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Argot operations
pub type Result<T> = std::result::Result<T, ArgotError>;

/// Main error type for Argot
#[derive(Error, Debug)]
pub enum ArgotError {
    /// Parsing, routing and completion errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// Command pattern errors
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Manifest errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shell execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Variable interpolation errors
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised while matching argv against commands
#[derive(Error, Debug)]
pub enum CliError {
    /// Structural mismatch. The router recovers from it by trying the next command.
    #[error("Invalid command: {0}")]
    Invalid(String),

    #[error("Command not found")]
    CommandNotFound,

    #[error("Command '{0}' has no action")]
    NoAction(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Action failed: {0}")]
    Action(#[source] anyhow::Error),

    #[error("Completion handler failed: {0}")]
    Completion(#[source] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Malformed command pattern DSL
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("unterminated '{open}' at position {position} in pattern \"{pattern}\"")]
    Unterminated {
        pattern: String,
        open: char,
        position: usize,
    },

    #[error("invalid parameter name '{name}' in pattern \"{pattern}\"")]
    InvalidName { pattern: String, name: String },

    #[error("unexpected '{found}' at position {position} in pattern \"{pattern}\"")]
    UnexpectedChar {
        pattern: String,
        found: char,
        position: usize,
    },

    #[error("spread parameter must be the last segment of \"{0}\"")]
    MisplacedSpread(String),

    #[error("emergency exit while tokenizing \"{0}\"")]
    EmergencyExit(String),

    #[error("failed to build matcher: {0}")]
    Regex(#[from] regex::Error),
}

/// Manifest parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find manifest file (searched: {0})")]
    NotFound(String),

    #[error("Invalid manifest: {0}")]
    Invalid(String),

    #[error("Command pattern \"{0}\" is declared more than once")]
    DuplicatePattern(String),

    #[error("Completion '{name}' does not name a parameter or option of \"{pattern}\"")]
    UnknownCompletionTarget { pattern: String, name: String },

    #[error("Command \"{0}\" declares both 'run' and 'output'")]
    ConflictingAction(String),

    #[error("Failed to read manifest '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Shell execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command failed with exit code {0:?}")]
    CommandFailed(Option<i32>),

    #[error("Failed to spawn '{program}': {error}")]
    Spawn { program: String, error: String },

    #[error("Interpreter is empty")]
    EmptyInterpreter,

    #[error("{0}")]
    Interpolation(#[from] InterpolationError),
}

/// Variable interpolation errors
#[derive(Error, Debug)]
pub enum InterpolationError {
    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(String),
}

/// Specialized result type for routing and parsing operations
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Specialized result type for pattern compilation
pub type PatternResult<T> = std::result::Result<T, PatternError>;

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Specialized result type for interpolation operations
pub type InterpolationResult<T> = std::result::Result<T, InterpolationError>;

/// Whether an error is a structural mismatch the router should recover from
pub fn is_invalid(err: &CliError) -> bool {
    matches!(err, CliError::Invalid(_))
}
