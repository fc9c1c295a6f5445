//! A single routable command
//!
//! A `Command` binds one compiled pattern, its option registry, its
//! completion handlers and an optional action. It is configured through
//! chained `&mut self` builder calls and then only read.

use crate::command::handler::{action_fn, async_action_fn, ActionFn, CompletionHandler, IntoActionOutput};
use crate::command::help::render_usage;
use crate::command::input::{Argument, ParsedInput};
use crate::command::option::{OptionParams, OptionRegistry, OptionSpec, OptionValue};
use crate::error::{CliError, CliResult, PatternResult};
use crate::logger::Logger;
use crate::parser::{ArgCursor, OptionSyntax};
use crate::pattern::Pattern;
use std::fmt;
use std::future::Future;

/// Name of the option registered by `Command::help`
pub const HELP_OPTION: &str = "help";

/// A command pattern with its options, completions and action
#[derive(Clone)]
pub struct Command {
    pattern: Pattern,
    description: Option<String>,
    help: bool,
    options: OptionRegistry,
    completions: Vec<CompletionHandler>,
    action: Option<ActionFn>,
    logger: Logger,
}

impl Command {
    /// Compile `pattern` into a new command without options or action
    pub fn new(pattern: &str) -> PatternResult<Self> {
        Ok(Command {
            pattern: Pattern::compile(pattern)?,
            description: None,
            help: true,
            options: OptionRegistry::new(),
            completions: Vec::new(),
            action: None,
            logger: Logger::disabled(),
        })
    }

    /// The pattern string this command was registered with
    pub fn name(&self) -> &str {
        self.pattern.source()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn options(&self) -> &OptionRegistry {
        &self.options
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Whether help (and completion) is enabled for this command
    pub fn is_help_enabled(&self) -> bool {
        self.help
    }

    pub fn set_logger(&mut self, logger: Logger) -> &mut Self {
        self.logger = logger;
        self
    }

    /// Register an option, replacing an earlier one with the same name
    pub fn option(&mut self, name: &str, params: OptionParams) -> &mut Self {
        self.options.insert(OptionSpec::new(name, params));
        self
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Enable `--help`/`-h`, which renders usage instead of running the action
    pub fn help(&mut self, description: impl Into<String>) -> &mut Self {
        self.help = true;
        self.description = Some(description.into()).filter(|d: &String| !d.is_empty());
        self.option(
            HELP_OPTION,
            OptionParams::boolean()
                .alias('h')
                .description("Help")
                .help(false),
        )
    }

    /// Disable help; the command then offers no completions either
    pub fn disable_help(&mut self) -> &mut Self {
        self.help = false;
        self
    }

    /// Register a synchronous completion callback for a parameter or option
    pub fn completion<F, I, S>(&mut self, name: &str, callback: F) -> &mut Self
    where
        F: Fn(&ParsedInput) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completion_with(CompletionHandler::new(name, callback))
    }

    /// Register an asynchronous completion callback
    pub fn completion_async<F, Fut>(&mut self, name: &str, callback: F) -> &mut Self
    where
        F: Fn(ParsedInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
    {
        self.completion_with(CompletionHandler::from_async(name, callback))
    }

    pub fn completion_with(&mut self, handler: CompletionHandler) -> &mut Self {
        self.completions.push(handler);
        self
    }

    /// The first handler registered for `name`
    pub fn completion_for(&self, name: &str) -> Option<&CompletionHandler> {
        self.completions.iter().find(|c| c.name() == name)
    }

    /// Bind a synchronous action
    pub fn action<F, R>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&ParsedInput) -> R + Send + Sync + 'static,
        R: IntoActionOutput,
    {
        self.action = Some(action_fn(action));
        self
    }

    /// Bind an asynchronous action
    pub fn action_async<F, Fut>(&mut self, action: F) -> &mut Self
    where
        F: Fn(ParsedInput) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoActionOutput,
    {
        self.action = Some(async_action_fn(action));
        self
    }

    /// Match argv against this command.
    ///
    /// Fails with `CliError::Invalid` when the input does not have this
    /// command's shape.
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> CliResult<ParsedInput> {
        let parts = to_parts(argv);
        let mut cursor = ArgCursor::new(&parts);
        let mut input = ParsedInput::with_defaults(&self.options);

        for segment in self.pattern.segments() {
            if let Some((name, required)) = segment.spread() {
                let values = cursor.remaining().to_vec();
                if required && values.is_empty() {
                    return Err(CliError::Invalid(format!("missing values for '{}'", name)));
                }

                input.set_argument(name, Argument::List(values));
                cursor.finish();
            } else if cursor.is_command(segment) {
                for (name, value) in segment.captures(cursor.part()).unwrap_or_default() {
                    input.set_argument(name, Argument::Single(value));
                }
                cursor.next();
            } else if cursor.eol() && segment.accepts_empty() {
                // optional segment left out
            } else {
                return Err(CliError::Invalid(format!(
                    "\"{}\" does not match \"{}\"",
                    cursor.part(),
                    segment.source()
                )));
            }

            self.consume_options(&mut cursor, &mut input);
        }

        if !cursor.eol() {
            return Err(CliError::Invalid(format!(
                "unconsumed input \"{}\"",
                cursor.part()
            )));
        }

        Ok(input)
    }

    /// Record every option-shaped token at the cursor.
    ///
    /// Unknown names are skipped without error; in a combined group only
    /// boolean aliases take effect.
    fn consume_options(&self, cursor: &mut ArgCursor<'_>, input: &mut ParsedInput) {
        while let Some(syntax) = cursor.option_syntax() {
            match syntax {
                OptionSyntax::Flag { dash, name } => {
                    if let Some(spec) = self.options.lookup(dash, &name) {
                        if spec.kind.takes_value() {
                            cursor.next();
                        }
                        input.push_option(&spec.name, OptionValue::parse(spec.kind, cursor.part()));
                    } else {
                        self.logger.debug(&format!("ignoring unknown option '{}{}'", dash.as_str(), name));
                    }
                }
                OptionSyntax::Inline { dash, name, value } => {
                    if let Some(spec) = self.options.lookup(dash, &name) {
                        input.push_option(&spec.name, OptionValue::parse(spec.kind, &value));
                    } else {
                        self.logger.debug(&format!("ignoring unknown option '{}{}'", dash.as_str(), name));
                    }
                }
                OptionSyntax::Combined(aliases) => {
                    for alias in aliases {
                        if let Some(spec) = self.options.by_alias(alias) {
                            if !spec.kind.takes_value() {
                                input.push_option(&spec.name, OptionValue::Bool(true));
                            }
                        }
                    }
                }
            }

            cursor.next();
        }
    }

    /// Run the action for parsed input, or render usage when `--help` is set
    pub async fn emit(&self, program: &str, input: ParsedInput) -> CliResult<String> {
        if self.help && self.options.get(HELP_OPTION).is_some() && input.flag(HELP_OPTION) {
            return Ok(self.usage(program));
        }

        let action = self
            .action
            .as_ref()
            .ok_or_else(|| CliError::NoAction(self.name().to_string()))?;

        let output = action(input).await.map_err(CliError::Action)?;

        Ok(output.unwrap_or_default())
    }

    /// Parse then emit
    pub async fn process<S: AsRef<str>>(&self, program: &str, argv: &[S]) -> CliResult<String> {
        let input = self.parse(argv)?;
        self.emit(program, input).await
    }

    /// Usage text for this command
    pub fn usage(&self, program: &str) -> String {
        render_usage(program, self)
    }

    pub(crate) fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("pattern", &self.pattern.source())
            .field("description", &self.description)
            .field("help", &self.help)
            .field("options", &self.options)
            .field("completions", &self.completions)
            .field("action", &self.action.is_some())
            .finish()
    }
}

pub(crate) fn to_parts<S: AsRef<str>>(argv: &[S]) -> Vec<String> {
    argv.iter().map(|s| s.as_ref().to_string()).collect()
}
