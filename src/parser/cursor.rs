//! Stateful cursor over argv tokens

use crate::parser::syntax::{OptionSyntax, PartialOption};
use crate::pattern::Segment;

/// A cursor over the input tokens of one parse or completion pass
#[derive(Debug, Clone)]
pub struct ArgCursor<'a> {
    parts: &'a [String],
    index: usize,
}

impl<'a> ArgCursor<'a> {
    pub fn new(parts: &'a [String]) -> Self {
        ArgCursor { parts, index: 0 }
    }

    /// The current token, or an empty string past the end
    pub fn part(&self) -> &'a str {
        self.parts.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// End of input
    pub fn eol(&self) -> bool {
        self.index >= self.parts.len()
    }

    /// Whether the current token is the final one
    pub fn is_last(&self) -> bool {
        !self.parts.is_empty() && self.index == self.parts.len() - 1
    }

    pub fn next(&mut self) {
        self.index += 1;
    }

    /// Jump past the final token
    pub fn finish(&mut self) {
        self.index = self.parts.len();
    }

    /// Tokens from the current position on
    pub fn remaining(&self) -> &'a [String] {
        self.parts.get(self.index..).unwrap_or(&[])
    }

    /// Whether the current token is option-shaped
    pub fn is_option(&self) -> bool {
        !self.eol() && OptionSyntax::is_option(self.part())
    }

    /// Like `is_option`, but also accepts a bare `-`/`--` being typed
    pub fn is_partial_option(&self) -> bool {
        !self.eol() && (PartialOption::is_bare_dash(self.part()) || self.is_option())
    }

    pub fn option_syntax(&self) -> Option<OptionSyntax> {
        if self.eol() {
            return None;
        }
        OptionSyntax::classify(self.part())
    }

    /// Whether the current token is a complete match for `segment`
    pub fn is_command(&self, segment: &Segment) -> bool {
        !self.eol() && !self.is_option() && segment.is_match(self.part())
    }

    /// Whether the current token is an in-progress typing of `segment`
    pub fn is_partial_command(&self, segment: &Segment) -> bool {
        !self.eol() && !self.is_option() && segment.is_partial_match(self.part())
    }

    /// Whether `segment` is a spread and there is input left for it
    pub fn is_spread(&self, segment: &Segment) -> bool {
        !self.eol() && segment.is_spread()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn segment(source: &str) -> Segment {
        Segment::compile(source, source, 0).unwrap()
    }

    #[test]
    fn test_progress_through_parts() {
        let input = parts(&["foo", "bar"]);
        let mut cursor = ArgCursor::new(&input);

        assert_eq!(cursor.part(), "foo");
        assert!(!cursor.is_last());
        cursor.next();
        assert_eq!(cursor.part(), "bar");
        assert!(cursor.is_last());
        cursor.next();
        assert!(cursor.eol());
        assert_eq!(cursor.part(), "");
        assert!(cursor.remaining().is_empty());
    }

    #[test]
    fn test_empty_input() {
        let input: Vec<String> = Vec::new();
        let cursor = ArgCursor::new(&input);
        assert!(cursor.eol());
        assert!(!cursor.is_last());
        assert!(!cursor.is_option());
    }

    #[test]
    fn test_is_command() {
        let input = parts(&["test"]);
        let cursor = ArgCursor::new(&input);

        assert!(cursor.is_command(&segment("test")));
        assert!(cursor.is_command(&segment("<command>")));
        assert!(!cursor.is_command(&segment("/")));
    }

    #[test]
    fn test_option_is_never_a_command() {
        let input = parts(&["-n"]);
        let cursor = ArgCursor::new(&input);
        assert!(!cursor.is_command(&segment("<name>")));
    }

    #[test]
    fn test_is_option() {
        let input = parts(&["-n", "a", "-"]);
        let mut cursor = ArgCursor::new(&input);

        assert!(cursor.is_option());
        cursor.next();
        assert!(!cursor.is_option());
        cursor.next();
        assert!(!cursor.is_option());
        assert!(cursor.is_partial_option());
    }

    #[test]
    fn test_finish_and_remaining() {
        let input = parts(&["a", "b", "c"]);
        let mut cursor = ArgCursor::new(&input);
        cursor.next();
        assert_eq!(cursor.remaining(), &input[1..]);
        cursor.finish();
        assert!(cursor.eol());
    }
}
