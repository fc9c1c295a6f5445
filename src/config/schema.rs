//! Manifest validation

use crate::config::types::{CommandDef, Manifest};
use crate::error::{ConfigError, ConfigResult};
use crate::pattern::Pattern;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static OPTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_-]*$").expect("option name regex is valid")
});

/// Validate a complete manifest
pub fn validate_manifest(manifest: &Manifest) -> ConfigResult<()> {
    let mut patterns = HashSet::new();

    for command in &manifest.commands {
        if !patterns.insert(command.pattern.as_str()) {
            return Err(ConfigError::DuplicatePattern(command.pattern.clone()));
        }

        validate_command(command)?;
    }

    if let Some(interpreter) = &manifest.interpreter {
        if interpreter.is_empty() {
            return Err(ConfigError::Invalid("interpreter must not be empty".to_string()));
        }
    }

    Ok(())
}

/// Validate a single command
pub fn validate_command(command: &CommandDef) -> ConfigResult<()> {
    let pattern = Pattern::compile(&command.pattern)
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;

    if command.run.is_some() && command.output.is_some() {
        return Err(ConfigError::ConflictingAction(command.pattern.clone()));
    }

    for option in &command.options {
        if !OPTION_NAME.is_match(&option.name) {
            return Err(ConfigError::Invalid(format!(
                "invalid option name '{}' in \"{}\"",
                option.name, command.pattern
            )));
        }
        if let Some(alias) = option.alias {
            if !(alias.is_ascii_alphanumeric() || alias == '_') {
                return Err(ConfigError::Invalid(format!(
                    "invalid alias '{}' for option '{}'",
                    alias, option.name
                )));
            }
        }
    }

    let params = pattern.names();
    for name in command.completions.keys() {
        let known = params.contains(&name.as_str())
            || command.options.iter().any(|option| &option.name == name);

        if !known {
            return Err(ConfigError::UnknownCompletionTarget {
                pattern: command.pattern.clone(),
                name: name.clone(),
            });
        }
    }

    Ok(())
}
