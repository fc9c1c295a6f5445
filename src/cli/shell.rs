//! Shell line handling for the completion protocol

/// Split a command line into words.
///
/// Words are separated by unquoted whitespace. Single or double quotes
/// group a word, and a backslash makes the next character literal.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escapes = 0usize;

    for c in line.chars() {
        match c {
            '\\' => escapes += 1,
            '"' | '\'' if escapes == 0 && quote.is_none() => quote = Some(c),
            _ if escapes == 0 && quote == Some(c) => {
                push_word(&mut words, &mut current);
                quote = None;
            }
            _ if escapes == 0 && quote.is_none() && c.is_whitespace() => {
                push_word(&mut words, &mut current);
            }
            _ => {
                // a run of n backslashes keeps n - 1 of them
                for _ in 1..escapes {
                    current.push('\\');
                }
                current.push(c);
                escapes = 0;
            }
        }
    }

    push_word(&mut words, &mut current);
    words
}

fn push_word(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Escape whitespace in a candidate as `\ `
pub fn escape_whitespace(candidate: &str) -> String {
    let mut escaped = String::with_capacity(candidate.len());
    for c in candidate.chars() {
        if c.is_whitespace() {
            escaped.push_str("\\ ");
        } else {
            escaped.push(c);
        }
    }
    escaped
}
