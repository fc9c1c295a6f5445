//! Shell execution context
//!
//! The context holds what a manifest command needs to run: the
//! interpreter, the working directory and the variables from parsed input.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Interpreter used when the manifest does not set one
pub fn default_interpreter() -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string()]
}

/// Execution context for shell commands
#[derive(Debug, Clone)]
pub struct Context {
    /// Current working directory
    pub working_dir: PathBuf,

    /// Variables from arguments and options
    pub vars: HashMap<String, String>,

    /// Interpreter (e.g., ["bash", "-c"])
    pub interpreter: Vec<String>,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            vars: HashMap::new(),
            interpreter: default_interpreter(),
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set variables
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = vars;
        self
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
