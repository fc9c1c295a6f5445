//! Command router
//!
//! `Cli` keeps commands in registration order. Execution runs the first
//! command whose pattern matches; completion asks every command and
//! concatenates what they predict.

use crate::cli::script::completion_script;
use crate::cli::shell::{escape_whitespace, split_line};
use crate::command::Command;
use crate::error::{is_invalid, CliError, CliResult, PatternResult};
use crate::logger::Logger;

/// An ordered collection of commands sharing one program name
#[derive(Debug, Clone)]
pub struct Cli {
    name: String,
    description: Option<String>,
    commands: Vec<Command>,
    logger: Logger,
}

impl Cli {
    pub fn new(name: impl Into<String>) -> Self {
        Cli {
            name: name.into(),
            description: None,
            commands: Vec::new(),
            logger: Logger::disabled(),
        }
    }

    /// Use `logger` for the router and every command, present and future
    pub fn with_logger(mut self, logger: Logger) -> Self {
        for command in &mut self.commands {
            command.set_logger(logger.clone());
        }
        self.logger = logger;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Program name used in usage text and the completion script
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The command registered under `pattern`, created on first use
    pub fn command(&mut self, pattern: &str) -> PatternResult<&mut Command> {
        let index = match self.commands.iter().position(|c| c.name() == pattern) {
            Some(index) => index,
            None => {
                let mut command = Command::new(pattern)?;
                command.set_logger(self.logger.clone());
                self.commands.push(command);
                self.commands.len() - 1
            }
        };

        Ok(&mut self.commands[index])
    }

    /// Look up a registered command without creating it
    pub fn get(&self, pattern: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == pattern)
    }

    /// Run the first command that accepts `argv`.
    ///
    /// Parse failures move on to the next command; once a command matches,
    /// its result (or failure) is final.
    pub async fn process<S: AsRef<str>>(&self, argv: &[S]) -> CliResult<String> {
        for command in &self.commands {
            match command.parse(argv) {
                Ok(input) => {
                    self.logger.debug(&format!("matched \"{}\"", command.name()));
                    return command.emit(&self.name, input).await;
                }
                Err(err) if is_invalid(&err) => {
                    self.logger
                        .debug(&format!("skipping \"{}\": {}", command.name(), err));
                }
                Err(err) => {
                    self.logger
                        .error(&format!("\"{}\" failed to parse: {}", command.name(), err));
                }
            }
        }

        Err(CliError::CommandNotFound)
    }

    /// Candidates from every command for the last element of `argv`.
    ///
    /// Never fails: a command that cannot complete contributes nothing.
    pub async fn complete<S: AsRef<str>>(&self, argv: &[S]) -> Vec<String> {
        let mut candidates = Vec::new();

        for command in &self.commands {
            match command.complete(argv).await {
                Ok(predicted) => candidates.extend(predicted),
                Err(err) => {
                    self.logger
                        .debug(&format!("no completion from \"{}\": {}", command.name(), err));
                }
            }
        }

        candidates
            .iter()
            .map(|candidate| escape_whitespace(candidate))
            .collect()
    }

    /// Answer a shell completion request.
    ///
    /// `line` is the whole command line including the program word and
    /// `index` the position of the word being completed. Returns one
    /// candidate per line.
    pub async fn complete_line(&self, index: usize, line: &str) -> String {
        let mut words = split_line(line);
        if words.len() <= index {
            words.push(String::new());
        }

        let argv = words.get(1..).unwrap_or(&[]);
        let candidates = self.complete(argv).await;
        self.logger.debug(&format!(
            "completing word {} of {:?}: {} candidate(s)",
            index,
            words,
            candidates.len()
        ));

        candidates.join("\n")
    }

    pub fn completion_script(&self) -> String {
        completion_script(&self.name)
    }
}
