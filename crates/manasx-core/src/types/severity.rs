//! Violation severity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity levels for violations, most severe first.
///
/// Serialized as lowercase strings. Any unrecognized string deserializes
/// to `Info` so that foreign or hand-edited data never breaks scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// All severities in descending order.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    /// Penalty points against the 100-point compliance score.
    /// critical=10, high=5, medium=3, low=1, info=0.5, doubled.
    pub fn penalty(&self) -> u32 {
        match self {
            Self::Critical => 20,
            Self::High => 10,
            Self::Medium => 6,
            Self::Low => 2,
            Self::Info => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }

    /// Parse a severity label, case-insensitively. Unknown labels map to `Info`.
    pub fn parse_lenient(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Info,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_label_is_info() {
        let sev: Severity = serde_json::from_str("\"blocker\"").unwrap();
        assert_eq!(sev, Severity::Info);
        assert_eq!(Severity::parse_lenient("HIGH"), Severity::High);
    }

    #[test]
    fn penalties_descend_with_severity() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0].penalty() > pair[1].penalty());
        }
    }
}
