//! Pattern segment tokenizer

use crate::error::{PatternError, PatternResult};

/// Upper bound on tokenizer steps for a single segment
const MAX_TOKENIZE_STEPS: usize = 100;

/// Characters that open, close or are reserved by bracket constructs
const RESERVED: &[char] = &['[', ']', '<', '>', '{', '}'];

/// A single compiled piece of a pattern segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Plain text matched verbatim
    Literal(String),
    /// `<name>` or `[name]`
    Param { name: String, required: bool },
    /// `<...name>` or `[...name]`, consumes the rest of the input
    Spread { name: String, required: bool },
}

impl Token {
    /// Parameter or spread name
    pub fn name(&self) -> Option<&str> {
        match self {
            Token::Literal(_) => None,
            Token::Param { name, .. } | Token::Spread { name, .. } => Some(name),
        }
    }

    pub fn is_spread(&self) -> bool {
        matches!(self, Token::Spread { .. })
    }

    /// The pattern text this token was produced from
    pub fn source(&self) -> String {
        match self {
            Token::Literal(text) => text.clone(),
            Token::Param { name, required: true } => format!("<{}>", name),
            Token::Param { name, required: false } => format!("[{}]", name),
            Token::Spread { name, required: true } => format!("<...{}>", name),
            Token::Spread { name, required: false } => format!("[...{}]", name),
        }
    }

    /// Regex fragment matching this token.
    ///
    /// Parameters become lazy groups, capturing unless `capture` is false.
    pub fn regex_step(&self, capture: bool) -> String {
        let group = if capture { "(.+?)" } else { "(?:.+?)" };

        match self {
            Token::Literal(text) => regex::escape(text),
            Token::Param { required, .. } | Token::Spread { required, .. } => {
                if *required {
                    group.to_string()
                } else {
                    format!("{}?", group)
                }
            }
        }
    }
}

/// Tokenize one whitespace-free segment of `pattern`.
///
/// `offset` is the byte position of the segment inside the pattern and is
/// only used for error reporting.
pub fn tokenize_segment(pattern: &str, segment: &str, offset: usize) -> PatternResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = segment;
    let mut steps = 0;

    while !rest.is_empty() {
        steps += 1;
        if steps > MAX_TOKENIZE_STEPS {
            return Err(PatternError::EmergencyExit(pattern.to_string()));
        }

        let position = offset + (segment.len() - rest.len());
        let (token, consumed) = next_token(pattern, rest, position)?;

        tokens.push(token);
        rest = &rest[consumed..];
    }

    Ok(tokens)
}

/// Strip the leading construct off `rest`, returning it with its byte length
fn next_token(pattern: &str, rest: &str, position: usize) -> PatternResult<(Token, usize)> {
    let first = match rest.chars().next() {
        Some(c) => c,
        None => return Err(PatternError::EmergencyExit(pattern.to_string())),
    };

    let (close, required) = match first {
        '<' => ('>', true),
        '[' => (']', false),
        '>' | ']' | '{' | '}' => {
            return Err(PatternError::UnexpectedChar {
                pattern: pattern.to_string(),
                found: first,
                position,
            })
        }
        _ => {
            let end = rest.find(RESERVED).unwrap_or(rest.len());
            return Ok((Token::Literal(rest[..end].to_string()), end));
        }
    };

    let end = rest.find(close).ok_or_else(|| PatternError::Unterminated {
        pattern: pattern.to_string(),
        open: first,
        position,
    })?;

    let inner = &rest[1..end];
    let (name, spread) = match inner.strip_prefix("...") {
        Some(name) => (name, true),
        None => (inner, false),
    };

    if !is_valid_name(name) {
        return Err(PatternError::InvalidName {
            pattern: pattern.to_string(),
            name: inner.to_string(),
        });
    }

    let name = name.to_string();
    let token = if spread {
        Token::Spread { name, required }
    } else {
        Token::Param { name, required }
    };

    Ok((token, end + close.len_utf8()))
}

/// Parameter names are word characters and dashes
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
