//! The violation record shared by the drift detector and the rule engine.

use serde::{Deserialize, Serialize};

use super::severity::Severity;

/// Kind tag used for violations produced by the rule engine.
pub const RULE_KIND: &str = "rule";

/// A single finding against one file. Never mutated once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// `category/ruleId` for rules, `drift/<axis>` for drift findings.
    pub rule_id: String,
    /// Producer axis: `naming`, `imports`, `architecture`, `comments` or `rule`.
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub severity: Severity,
    pub message: String,
    /// Path relative to the project root, forward slashes.
    pub file: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Surrounding source lines, numbered, newline separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Violation {
    pub fn new(
        rule_id: impl Into<String>,
        kind: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            kind: kind.into(),
            category: category.into(),
            severity,
            message: message.into(),
            file: file.into(),
            line,
            column: None,
            suggestion: None,
            context: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
