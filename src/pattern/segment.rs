//! Compiled pattern segments and whole patterns

use crate::error::{PatternError, PatternResult};
use crate::pattern::token::{tokenize_segment, Token};
use regex::Regex;
use std::fmt;

/// One whitespace-separated piece of a pattern, matched against one argv token
#[derive(Debug, Clone)]
pub struct Segment {
    source: String,
    tokens: Vec<Token>,
    strict: Regex,
    partial: Regex,
}

impl Segment {
    /// Tokenize and compile a segment
    pub fn compile(pattern: &str, source: &str, offset: usize) -> PatternResult<Self> {
        let tokens = tokenize_segment(pattern, source, offset)?;
        let strict = Regex::new(&strict_source(&tokens))?;
        let partial = Regex::new(&partial_source(&tokens))?;

        Ok(Segment {
            source: source.to_string(),
            tokens,
            strict,
            partial,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The spread token, when this segment is a spread
    pub fn spread(&self) -> Option<(&str, bool)> {
        match self.tokens.as_slice() {
            [Token::Spread { name, required }] => Some((name.as_str(), *required)),
            _ => None,
        }
    }

    pub fn is_spread(&self) -> bool {
        self.spread().is_some()
    }

    /// Parameter names in capture-group order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(Token::name)
    }

    pub fn is_match(&self, part: &str) -> bool {
        self.strict.is_match(part)
    }

    pub fn is_partial_match(&self, part: &str) -> bool {
        self.partial.is_match(part)
    }

    /// Whether the segment can be left out entirely (every token optional)
    pub fn accepts_empty(&self) -> bool {
        self.strict.is_match("")
    }

    /// Bind parameter names to the values captured from `part`.
    ///
    /// Optional groups that did not participate are left out.
    pub fn captures(&self, part: &str) -> Option<Vec<(String, String)>> {
        let caps = self.strict.captures(part)?;

        Some(
            self.names()
                .enumerate()
                .filter_map(|(index, name)| {
                    caps.get(index + 1)
                        .map(|m| (name.to_string(), m.as_str().to_string()))
                })
                .collect(),
        )
    }
}

/// `^step1step2...$`
fn strict_source(tokens: &[Token]) -> String {
    let body: String = tokens.iter().map(|t| t.regex_step(true)).collect();
    format!("(?s)^{}$", body)
}

/// Union of every prefix of the strict expression, longest first.
///
/// Literal tokens contribute one prefix per character so that a partly
/// typed literal still matches.
fn partial_source(tokens: &[Token]) -> String {
    let mut prefix = String::new();
    let mut alternatives = Vec::new();

    for token in tokens {
        match token {
            Token::Literal(text) => {
                for c in text.chars() {
                    prefix.push_str(&regex::escape(&c.to_string()));
                    alternatives.push(prefix.clone());
                }
            }
            _ => {
                prefix.push_str(&token.regex_step(false));
                alternatives.push(prefix.clone());
            }
        }
    }

    alternatives.reverse();
    alternatives.push(String::new());

    format!("(?s)^(?:{})$", alternatives.join("|"))
}

/// A compiled command pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a pattern string.
    ///
    /// At most one spread may appear, as the whole last segment.
    pub fn compile(source: &str) -> PatternResult<Self> {
        let mut segments = Vec::new();
        let mut search_from = 0;

        for part in source.split_whitespace() {
            let offset = source[search_from..]
                .find(part)
                .map(|i| i + search_from)
                .unwrap_or(search_from);
            search_from = offset + part.len();

            segments.push(Segment::compile(source, part, offset)?);
        }

        let last = segments.len().saturating_sub(1);
        for (index, segment) in segments.iter().enumerate() {
            let has_spread = segment.tokens().iter().any(Token::is_spread);
            if has_spread && (index != last || !segment.is_spread()) {
                return Err(PatternError::MisplacedSpread(source.to_string()));
            }
        }

        Ok(Pattern {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every parameter and spread name, in pattern order
    pub fn names(&self) -> Vec<&str> {
        self.segments.iter().flat_map(Segment::names).collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
