//! Manifest types
//!
//! This module defines the data structures that represent an argot.yml manifest.

use crate::command::{OptionKind, OptionValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Program name used when the manifest does not set one
pub const DEFAULT_PROGRAM: &str = "argot";

/// Top-level manifest structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Manifest {
    /// Program name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Program description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Interpreter for `run` commands (e.g., ["sh", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,

    /// Commands, in routing order
    #[serde(default)]
    pub commands: Vec<CommandDef>,
}

impl Manifest {
    /// The program name, falling back to `argot`
    pub fn program(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PROGRAM)
    }
}

/// One routable command
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandDef {
    /// Command pattern, e.g. `test:<command>` or `config:set [...configs]`
    pub pattern: String,

    /// Description shown in usage text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether `--help`/`-h` is registered; `false` also hides the command
    /// from completion
    #[serde(default = "default_true")]
    pub help: bool,

    /// Named options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,

    /// Completion sources keyed by parameter or option name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub completions: HashMap<String, CompletionDef>,

    /// Shell command whose stdout is the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,

    /// Template whose interpolation is the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl CommandDef {
    /// Whether this command does anything when matched
    pub fn has_action(&self) -> bool {
        self.run.is_some() || self.output.is_some()
    }
}

/// A named option
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionDef {
    pub name: String,

    /// Value type (`boolean`, `string` or `number`)
    #[serde(rename = "type", default)]
    pub kind: OptionKind,

    /// Single-character alias used with one dash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<char>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the option is listed in usage text
    #[serde(default = "default_true")]
    pub help: bool,
}

/// A scalar default from YAML
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl DefaultValue {
    /// Convert to the value type of an option of `kind`
    pub fn to_value(&self, kind: OptionKind) -> OptionValue {
        match (self, kind) {
            (DefaultValue::Bool(value), _) => OptionValue::Bool(*value),
            (DefaultValue::Number(value), OptionKind::String) => {
                OptionValue::String(value.to_string())
            }
            (DefaultValue::Number(value), _) => OptionValue::Number(*value),
            (DefaultValue::Text(text), OptionKind::Boolean) => OptionValue::Bool(text == "true"),
            (DefaultValue::Text(text), kind) => OptionValue::parse(kind, text),
        }
    }
}

/// Where completion candidates come from
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CompletionDef {
    /// Fixed candidates
    List(Vec<String>),

    /// A shell command printing one candidate per line
    Command(CompletionCommand),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompletionCommand {
    pub command: String,

    /// Keep only candidates extending the typed text
    #[serde(default)]
    pub filter: bool,
}

fn default_true() -> bool {
    true
}
