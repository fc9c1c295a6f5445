//! Option definitions and per-command option registry

use crate::parser::Dash;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Leading numeric prefix accepted by float parsing
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid float regex")
});

/// Value type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    #[default]
    #[serde(alias = "bool")]
    Boolean,
    String,
    Number,
}

impl OptionKind {
    /// Whether the option consumes a value
    pub fn takes_value(&self) -> bool {
        !matches!(self, OptionKind::Boolean)
    }
}

/// A recorded or default option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl OptionValue {
    /// Coerce raw text into a value of `kind`.
    ///
    /// Booleans are set by presence alone; numbers never fail and yield NaN
    /// on text without a numeric prefix.
    pub fn parse(kind: OptionKind, text: &str) -> Self {
        match kind {
            OptionKind::Boolean => OptionValue::Bool(true),
            OptionKind::Number => OptionValue::Number(parse_float(text)),
            OptionKind::String => OptionValue::String(text.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness used for flag checks such as `--help`
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Number(n) => *n != 0.0 && !n.is_nan(),
            OptionValue::String(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Number(n) => write!(f, "{}", n),
            OptionValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

/// Float parsing over the longest numeric prefix, NaN when there is none
pub fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start();

    match FLOAT_PREFIX.find(trimmed) {
        Some(m) => {
            let number = m.as_str();
            match number.trim_start_matches(['+', '-']) {
                "Infinity" if number.starts_with('-') => f64::NEG_INFINITY,
                "Infinity" => f64::INFINITY,
                _ => number.parse().unwrap_or(f64::NAN),
            }
        }
        None => f64::NAN,
    }
}

/// Registration parameters for an option
#[derive(Debug, Clone)]
pub struct OptionParams {
    kind: OptionKind,
    alias: Option<char>,
    default: Option<OptionValue>,
    description: Option<String>,
    help: bool,
}

impl OptionParams {
    pub fn new(kind: OptionKind) -> Self {
        OptionParams {
            kind,
            alias: None,
            default: None,
            description: None,
            help: true,
        }
    }

    pub fn boolean() -> Self {
        Self::new(OptionKind::Boolean)
    }

    pub fn string() -> Self {
        Self::new(OptionKind::String)
    }

    pub fn number() -> Self {
        Self::new(OptionKind::Number)
    }

    /// Short alias, used as `-a`
    pub fn alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the option is listed in usage output
    pub fn help(mut self, visible: bool) -> Self {
        self.help = visible;
        self
    }
}

impl Default for OptionParams {
    fn default() -> Self {
        Self::boolean()
    }
}

/// A registered option
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub name: String,
    pub alias: Option<char>,
    pub kind: OptionKind,
    pub default: Option<OptionValue>,
    pub help: bool,
    pub description: Option<String>,
}

impl OptionSpec {
    /// Build a spec; boolean options always carry a boolean default
    pub fn new(name: impl Into<String>, params: OptionParams) -> Self {
        let default = match params.kind {
            OptionKind::Boolean => Some(OptionValue::Bool(
                params.default.and_then(|v| v.as_bool()).unwrap_or(false),
            )),
            _ => params.default,
        };

        OptionSpec {
            name: name.into(),
            alias: params.alias,
            kind: params.kind,
            default,
            help: params.help,
            description: params.description,
        }
    }

    /// Whether `name` is this option's alias
    fn has_alias(&self, name: &str) -> bool {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.alias == Some(c),
            _ => false,
        }
    }
}

/// Ordered option table of one command
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    specs: Vec<OptionSpec>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option, replacing any previous one with the same name
    pub fn insert(&mut self, spec: OptionSpec) {
        self.specs.retain(|s| s.name != spec.name);
        self.specs.push(spec);
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn by_alias(&self, alias: char) -> Option<&OptionSpec> {
        self.specs.iter().find(|s| s.alias == Some(alias))
    }

    /// Resolve a name typed after `-` (alias) or `--` (long name)
    pub fn lookup(&self, dash: Dash, name: &str) -> Option<&OptionSpec> {
        match dash {
            Dash::Long => self.get(name),
            Dash::Short => self.specs.iter().find(|s| s.has_alias(name)),
        }
    }

    /// Resolve a name typed either as an alias or a long name
    pub fn find(&self, name: &str) -> Option<&OptionSpec> {
        self.specs
            .iter()
            .find(|s| s.name == name || s.has_alias(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    /// Options listed in usage output
    pub fn visible(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter().filter(|s| s.help)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
