//! Parsed command input

use crate::command::option::{OptionRegistry, OptionValue};
use std::collections::HashMap;

/// A bound positional value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Single(String),
    /// Values consumed by a spread, in input order
    List(Vec<String>),
}

impl Argument {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::Single(value) => Some(value),
            Argument::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Argument::Single(_) => None,
            Argument::List(values) => Some(values),
        }
    }
}

/// One recorded option occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct OptionEntry {
    pub name: String,
    pub value: OptionValue,
}

/// The result of matching argv against a command
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedInput {
    arguments: HashMap<String, Argument>,
    options: Vec<OptionEntry>,
    defaults: HashMap<String, OptionValue>,
}

impl ParsedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an input that falls back to the defaults registered in `registry`
    pub fn with_defaults(registry: &OptionRegistry) -> Self {
        let defaults = registry
            .iter()
            .filter_map(|spec| spec.default.clone().map(|v| (spec.name.clone(), v)))
            .collect();

        ParsedInput {
            defaults,
            ..Self::default()
        }
    }

    /// Bind a positional value, replacing an earlier binding of the same name
    pub fn set_argument(&mut self, name: impl Into<String>, value: Argument) {
        self.arguments.insert(name.into(), value);
    }

    /// Record an option occurrence
    pub fn push_option(&mut self, name: impl Into<String>, value: OptionValue) {
        self.options.push(OptionEntry {
            name: name.into(),
            value,
        });
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.get(name)
    }

    /// Single positional value
    pub fn value(&self, name: &str) -> Option<&str> {
        self.argument(name).and_then(Argument::as_str)
    }

    /// Spread values; empty when the name is unbound
    pub fn values(&self, name: &str) -> &[String] {
        self.argument(name)
            .and_then(Argument::as_list)
            .unwrap_or(&[])
    }

    pub fn arguments(&self) -> &HashMap<String, Argument> {
        &self.arguments
    }

    /// First recorded value of an option, else its registered default
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
            .or_else(|| self.defaults.get(name))
    }

    /// Every recorded value of an option, in input order
    pub fn options_of(&self, name: &str) -> Vec<&OptionValue> {
        self.options
            .iter()
            .filter(|entry| entry.name == name)
            .map(|entry| &entry.value)
            .collect()
    }

    /// Whether a flag is set, by input or by default
    pub fn flag(&self, name: &str) -> bool {
        self.option(name).is_some_and(OptionValue::is_truthy)
    }

    /// String value of an option
    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(OptionValue::as_str)
    }

    /// All recorded option occurrences, in input order
    pub fn options(&self) -> &[OptionEntry] {
        &self.options
    }

    /// Flat variable view: arguments (spreads joined by spaces) and the
    /// effective value of every set or defaulted option.
    pub fn vars(&self) -> HashMap<String, String> {
        let mut vars: HashMap<String, String> = self
            .defaults
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();

        for entry in self.options.iter().rev() {
            vars.insert(entry.name.clone(), entry.value.to_string());
        }

        for (name, argument) in &self.arguments {
            let value = match argument {
                Argument::Single(value) => value.clone(),
                Argument::List(values) => values.join(" "),
            };
            vars.insert(name.clone(), value);
        }

        vars
    }
}
