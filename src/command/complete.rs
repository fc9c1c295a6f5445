//! Completion prediction
//!
//! `complete` walks argv like `parse` does, binding everything before the
//! final token, then predicts candidates for that final token: either the
//! remainder of a pattern segment (`predict_command`) or an option name or
//! value (`predict_option`).

use crate::command::command::{to_parts, Command};
use crate::command::input::{Argument, ParsedInput};
use crate::command::option::OptionValue;
use crate::error::{CliError, CliResult, PatternError};
use crate::parser::{ArgCursor, Dash, PartialOption};
use crate::pattern::{Segment, Token};
use regex::Regex;

/// Upper bound on automaton steps while predicting one segment
const MAX_PREDICT_STEPS: usize = 50;

impl Command {
    /// Candidates for the last element of `argv`, which may be empty.
    ///
    /// Fails with `CliError::Invalid` when the typed words do not fit this
    /// command.
    pub async fn complete<S: AsRef<str>>(&self, argv: &[S]) -> CliResult<Vec<String>> {
        if !self.is_help_enabled() {
            return Ok(Vec::new());
        }

        let parts = to_parts(argv);
        let mut cursor = ArgCursor::new(&parts);
        let mut input = ParsedInput::with_defaults(self.options());

        for segment in self.pattern().segments() {
            if cursor.eol() {
                return Ok(Vec::new());
            }

            if let Some((name, _)) = segment.spread() {
                let (partial, done) = match cursor.remaining().split_last() {
                    Some(split) => split,
                    None => return Ok(Vec::new()),
                };
                let values = done.iter().filter(|v| !v.is_empty()).cloned().collect();
                input.set_argument(name, Argument::List(values));

                return self.predict_command(segment, partial, &input).await;
            }

            if !cursor.is_last() && cursor.is_command(segment) {
                bind_captures(segment, cursor.part(), &mut input);
                cursor.next();
            } else if cursor.is_last() && cursor.is_partial_command(segment) {
                bind_captures(segment, cursor.part(), &mut input);

                return self.predict_command(segment, cursor.part(), &input).await;
            } else {
                return Err(CliError::Invalid(format!(
                    "\"{}\" does not match \"{}\"",
                    cursor.part(),
                    segment.source()
                )));
            }

            while cursor.is_partial_option() {
                if let Some(candidates) = self.predict_option(&mut cursor, &mut input).await? {
                    return Ok(candidates);
                }
                cursor.next();
            }
        }

        Ok(Vec::new())
    }

    /// Predict the full text of `segment` for the in-progress token `partial`.
    ///
    /// Literals extend every candidate; parameters with a handler multiply
    /// the candidates by the handler's suggestions. Prediction stops at the
    /// first step whose accumulated prefix no longer matches `partial`, and
    /// at the first parameter without a handler, so `<env>.<region>` offers
    /// nothing for `prod.` unless `env` has a handler.
    pub async fn predict_command(
        &self,
        segment: &Segment,
        partial: &str,
        input: &ParsedInput,
    ) -> CliResult<Vec<String>> {
        let mut candidates = vec![String::new()];
        let mut progress = String::from("(?s)^");

        for (step, token) in segment.tokens().iter().enumerate() {
            if step >= MAX_PREDICT_STEPS {
                return Err(CliError::Internal(format!(
                    "emergency exit while completing \"{}\"",
                    segment.source()
                )));
            }

            match token {
                Token::Literal(text) => {
                    for candidate in &mut candidates {
                        candidate.push_str(text);
                    }
                }
                Token::Param { name, .. } | Token::Spread { name, .. } => {
                    let handler = match self.completion_for(name) {
                        Some(handler) => handler,
                        None => break,
                    };

                    let mut suggestions = handler
                        .call(input.clone())
                        .await
                        .map_err(CliError::Completion)?;

                    if let Some(bound) = input.argument(name).and_then(Argument::as_list) {
                        suggestions.retain(|s| !bound.contains(s));
                    }

                    candidates = suggestions
                        .iter()
                        .flat_map(|s| candidates.iter().map(move |c| format!("{}{}", c, s)))
                        .collect();

                    if handler.filters_prefix() {
                        candidates.retain(|c| is_prefix_compatible(c, partial));
                    }
                }
            }

            progress.push_str(&token.regex_step(true));
            let matcher = Regex::new(&progress).map_err(PatternError::from)?;
            if !matcher.is_match(partial) {
                break;
            }
        }

        candidates.retain(|c| !c.is_empty());
        self.logger().debug(&format!(
            "predicted {} candidate(s) for \"{}\"",
            candidates.len(),
            segment.source()
        ));

        Ok(candidates)
    }

    /// Handle one option-shaped token during completion.
    ///
    /// Returns `Some` when the token at the cursor is the one being completed
    /// (an option name or an option value), `None` to keep walking.
    pub async fn predict_option(
        &self,
        cursor: &mut ArgCursor<'_>,
        input: &mut ParsedInput,
    ) -> CliResult<Option<Vec<String>>> {
        let typed = cursor.part();
        let partial = match PartialOption::parse(typed) {
            Some(partial) => partial,
            None => return Ok(None),
        };

        let spec = partial
            .name
            .as_deref()
            .and_then(|name| self.options().lookup(partial.dash, name));

        let spec = match spec {
            Some(spec) => spec,
            None => {
                if !partial.sign && cursor.is_last() {
                    return Ok(Some(self.option_names(partial.dash, typed)));
                }
                return Ok(None);
            }
        };

        if !spec.kind.takes_value() {
            if cursor.is_last() && !partial.sign {
                return Ok(Some(vec![typed.to_string()]));
            }
            input.push_option(&spec.name, OptionValue::Bool(true));
            return Ok(None);
        }

        // `-n` as the final token completes its value with nothing typed yet
        let mut value = partial.value.clone();
        if !partial.sign && !cursor.is_last() {
            cursor.next();
            value = cursor.part().to_string();
        }

        if !cursor.is_last() {
            input.push_option(&spec.name, OptionValue::parse(spec.kind, &value));
            return Ok(None);
        }

        let handler = match self.completion_for(&spec.name) {
            Some(handler) => handler,
            None => return Ok(Some(Vec::new())),
        };

        let mut suggestions = handler
            .call(input.clone())
            .await
            .map_err(CliError::Completion)?;

        if handler.filters_prefix() {
            suggestions.retain(|s| s.starts_with(&value));
        }

        let name = partial.name.unwrap_or_default();
        let candidates = suggestions
            .into_iter()
            .map(|s| {
                if partial.sign {
                    format!("{}{}={}", partial.dash.as_str(), name, s)
                } else {
                    s
                }
            })
            .collect();

        Ok(Some(candidates))
    }

    /// Every registered option in the typed dash style, filtered by `typed`.
    ///
    /// A single dash offers aliases and long names, a double dash long names only.
    fn option_names(&self, dash: Dash, typed: &str) -> Vec<String> {
        let mut names = Vec::new();

        for spec in self.options().iter() {
            if dash == Dash::Short {
                if let Some(alias) = spec.alias {
                    names.push(format!("-{}", alias));
                }
            }
            names.push(format!("--{}", spec.name));
        }

        names.retain(|name| name.starts_with(typed));
        names
    }
}

/// Bind whatever `part` fully matches of `segment`
fn bind_captures(segment: &Segment, part: &str, input: &mut ParsedInput) {
    for (name, value) in segment.captures(part).unwrap_or_default() {
        input.set_argument(name, Argument::Single(value));
    }
}

/// Whether one of the two strings is a prefix of the other
fn is_prefix_compatible(candidate: &str, partial: &str) -> bool {
    candidate.starts_with(partial) || partial.starts_with(candidate)
}
