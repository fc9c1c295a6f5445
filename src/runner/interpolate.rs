//! Variable interpolation for strings
//!
//! This module replaces `${var}` references with values from parsed input,
//! falling back to environment variables. Substituted values are not
//! expanded again.

use crate::error::{InterpolationError, InterpolationResult};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env;
use std::sync::LazyLock;

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("variable regex is valid"));

/// Interpolate variables in a string
///
/// Supports:
/// - `${var}` - variable from `vars`
/// - Environment variables (when not found in `vars`)
///
/// Unknown references are left unchanged.
pub fn interpolate(s: &str, vars: &HashMap<String, String>) -> String {
    VARIABLE
        .replace_all(s, |caps: &Captures| {
            lookup(&caps[1], vars).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Interpolate with strict mode - errors on undefined variables
pub fn interpolate_strict(
    s: &str,
    vars: &HashMap<String, String>,
) -> InterpolationResult<String> {
    if let Some(caps) = VARIABLE
        .captures_iter(s)
        .find(|caps| lookup(&caps[1], vars).is_none())
    {
        return Err(InterpolationError::UndefinedVariable(caps[1].to_string()));
    }

    Ok(interpolate(s, vars))
}

fn lookup(name: &str, vars: &HashMap<String, String>) -> Option<String> {
    vars.get(name).cloned().or_else(|| env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_interpolation() {
        let result = interpolate("Hello, ${name}!", &vars(&[("name", "world")]));
        assert_eq!(result, "Hello, world!");
    }

    #[test]
    fn test_repeated_variable() {
        let result = interpolate("${a}-${a}", &vars(&[("a", "x")]));
        assert_eq!(result, "x-x");
    }

    #[test]
    fn test_environment_variable() {
        env::set_var("ARGOT_TEST_INTERPOLATE", "test_value");

        let result = interpolate("Value: ${ARGOT_TEST_INTERPOLATE}", &HashMap::new());
        assert_eq!(result, "Value: test_value");

        env::remove_var("ARGOT_TEST_INTERPOLATE");
    }

    #[test]
    fn test_undefined_variable_lenient() {
        let result = interpolate("Hello, ${undefined_argot_var}!", &HashMap::new());
        assert_eq!(result, "Hello, ${undefined_argot_var}!");
    }

    #[test]
    fn test_undefined_variable_strict() {
        let result = interpolate_strict("Hello, ${undefined_argot_var}!", &HashMap::new());
        assert!(matches!(
            result,
            Err(InterpolationError::UndefinedVariable(name)) if name == "undefined_argot_var"
        ));
    }

    #[test]
    fn test_values_are_not_expanded_again() {
        let result = interpolate("${outer}", &vars(&[("outer", "${inner}"), ("inner", "x")]));
        assert_eq!(result, "${inner}");
    }

    #[test]
    fn test_empty_braces_untouched() {
        let result = interpolate("Value: ${}", &HashMap::new());
        assert_eq!(result, "Value: ${}");
    }
}
