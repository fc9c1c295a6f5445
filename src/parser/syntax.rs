//! Option token classification

use regex::Regex;
use std::sync::LazyLock;

/// `--name` or `-a`
static FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-(?:-([A-Za-z0-9_][A-Za-z0-9_-]*)|([A-Za-z0-9_]))$").expect("valid flag regex")
});

/// `--name=value` or `-a=value`
static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^-(?:-([A-Za-z0-9_][A-Za-z0-9_-]*)|([A-Za-z0-9_]))=(.*)$")
        .expect("valid inline option regex")
});

/// `-abc`
static COMBINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-([A-Za-z0-9_]+)$").expect("valid combined flags regex"));

/// An in-progress option token: `-`, `--na`, `-n=`, `--name=fo`
static PARTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(--?)([A-Za-z0-9_][A-Za-z0-9_-]*)?(=)?(.*)$").expect("valid partial option regex")
});

/// Leading dash style of an option token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    /// `-a`, matched against aliases
    Short,
    /// `--name`, matched against names
    Long,
}

impl Dash {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dash::Short => "-",
            Dash::Long => "--",
        }
    }
}

/// The shape of a complete option token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSyntax {
    /// `--name` / `-a`; a value, if any, follows in the next token
    Flag { dash: Dash, name: String },
    /// `--name=value` / `-a=value`
    Inline {
        dash: Dash,
        name: String,
        value: String,
    },
    /// `-abc`, each letter an alias
    Combined(Vec<char>),
}

impl OptionSyntax {
    /// Classify a token, or `None` when it is not option-shaped
    pub fn classify(part: &str) -> Option<Self> {
        if let Some(caps) = FLAG.captures(part) {
            let (dash, name) = dash_and_name(&caps);
            return Some(OptionSyntax::Flag { dash, name });
        }

        if let Some(caps) = INLINE.captures(part) {
            let (dash, name) = dash_and_name(&caps);
            let value = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
            return Some(OptionSyntax::Inline {
                dash,
                name,
                value: value.to_string(),
            });
        }

        COMBINED
            .captures(part)
            .and_then(|caps| caps.get(1))
            .map(|m| OptionSyntax::Combined(m.as_str().chars().collect()))
    }

    pub fn is_option(part: &str) -> bool {
        FLAG.is_match(part) || INLINE.is_match(part) || COMBINED.is_match(part)
    }
}

/// Long name in group 1, short alias in group 2
fn dash_and_name(caps: &regex::Captures<'_>) -> (Dash, String) {
    match (caps.get(1), caps.get(2)) {
        (Some(long), _) => (Dash::Long, long.as_str().to_string()),
        (None, Some(short)) => (Dash::Short, short.as_str().to_string()),
        (None, None) => (Dash::Short, String::new()),
    }
}

/// An option token being typed at the completion position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialOption {
    pub dash: Dash,
    pub name: Option<String>,
    /// Whether `=` was typed
    pub sign: bool,
    pub value: String,
}

impl PartialOption {
    pub fn parse(part: &str) -> Option<Self> {
        let caps = PARTIAL.captures(part)?;
        let dash = match caps.get(1).map(|m| m.as_str()) {
            Some("--") => Dash::Long,
            _ => Dash::Short,
        };

        Some(PartialOption {
            dash,
            name: caps.get(2).map(|m| m.as_str().to_string()),
            sign: caps.get(3).is_some(),
            value: caps
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// A bare `-` or `--`
    pub fn is_bare_dash(part: &str) -> bool {
        part == "-" || part == "--"
    }
}
