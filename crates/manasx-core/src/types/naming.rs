//! Identifier naming conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A naming convention recognized by the learner and the drift detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingConvention {
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "UPPER_CASE")]
    UpperCase,
    #[serde(rename = "unknown")]
    Unknown,
}

impl NamingConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CamelCase => "camelCase",
            Self::SnakeCase => "snake_case",
            Self::PascalCase => "PascalCase",
            Self::KebabCase => "kebab-case",
            Self::UpperCase => "UPPER_CASE",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`as_str`](Self::as_str). Unrecognized labels are `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "camelCase" => Self::CamelCase,
            "snake_case" => Self::SnakeCase,
            "PascalCase" => Self::PascalCase,
            "kebab-case" => Self::KebabCase,
            "UPPER_CASE" => Self::UpperCase,
            _ => Self::Unknown,
        }
    }

    /// Classify an identifier. Leading `_` and `$` are ignored.
    ///
    /// Checked in order: UPPER_CASE (more than one char), camelCase,
    /// snake_case, PascalCase, kebab-case. A single all-lowercase word
    /// classifies as camelCase.
    pub fn classify(name: &str) -> Self {
        let name = name.trim_start_matches(['_', '$']);
        if name.is_empty() {
            return Self::Unknown;
        }
        let first = match name.chars().next() {
            Some(c) => c,
            None => return Self::Unknown,
        };
        let has_upper = name.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = name.chars().any(|c| c.is_ascii_lowercase());
        let alnum = name.chars().all(|c| c.is_ascii_alphanumeric());

        if name.len() > 1
            && has_upper
            && !has_lower
            && first.is_ascii_uppercase()
            && name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        {
            return Self::UpperCase;
        }
        if first.is_ascii_lowercase() && alnum && has_upper {
            return Self::CamelCase;
        }
        if first.is_ascii_lowercase()
            && name.contains('_')
            && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Self::SnakeCase;
        }
        if first.is_ascii_uppercase() && alnum && has_lower {
            return Self::PascalCase;
        }
        if first.is_ascii_lowercase()
            && name.contains('-')
            && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Self::KebabCase;
        }
        if Self::is_single_lower_word(name) {
            return Self::CamelCase;
        }
        Self::Unknown
    }

    /// True for a lowercase word with no separators, e.g. `count` or `v2`.
    pub fn is_single_lower_word(name: &str) -> bool {
        let name = name.trim_start_matches(['_', '$']);
        matches!(name.chars().next(), Some(c) if c.is_ascii_lowercase())
            && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    }

    /// Whether `name` is acceptable under this convention. Single lowercase
    /// words satisfy camelCase, snake_case and kebab-case alike; unclassifiable
    /// names are never flagged.
    pub fn accepts(&self, name: &str) -> bool {
        if *self == Self::Unknown {
            return true;
        }
        if Self::is_single_lower_word(name)
            && matches!(self, Self::CamelCase | Self::SnakeCase | Self::KebabCase)
        {
            return true;
        }
        match Self::classify(name) {
            Self::Unknown => true,
            found => found == *self,
        }
    }

    /// Rewrite `name` in this convention. Returns the input unchanged for `Unknown`.
    pub fn convert(&self, name: &str) -> String {
        let words = split_words(name);
        if words.is_empty() {
            return name.to_string();
        }
        match self {
            Self::CamelCase => {
                let mut out = words[0].to_lowercase();
                for w in &words[1..] {
                    out.push_str(&capitalize(w));
                }
                out
            }
            Self::PascalCase => words.iter().map(|w| capitalize(w)).collect(),
            Self::SnakeCase => join_lower(&words, "_"),
            Self::KebabCase => join_lower(&words, "-"),
            Self::UpperCase => words
                .iter()
                .map(|w| w.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
            Self::Unknown => name.to_string(),
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split an identifier on `_`, `-` and lower-to-upper case boundaries.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;
    for c in name.chars() {
        if c == '_' || c == '-' || c == '$' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn join_lower(words: &[String], sep: &str) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}
