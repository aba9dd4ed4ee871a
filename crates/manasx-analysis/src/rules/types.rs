//! Core types for the rule engine.

use manasx_core::errors::RuleError;
use manasx_core::types::profile::PatternProfile;
use manasx_core::types::violation::RULE_KIND;
use manasx_core::types::{Severity, Violation};
use serde_json::{Map, Value};

use crate::tokenizer::LexicalTokenizer;

/// Category evaluated only when the AI classifier flags content.
pub const AI_CODE_CATEGORY: &str = "ai-code";

/// Categories the built-in registry knows about.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "security",
    "api",
    "performance",
    "architecture",
    "naming",
    AI_CODE_CATEGORY,
];

/// A rule resolved from configuration: enabled, with its effective severity.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// `category/ruleId`.
    pub id: String,
    pub category: String,
    pub name: String,
    pub description: String,
    pub severity: Severity,
    pub parameters: Map<String, Value>,
}

impl Rule {
    /// String parameter, or `default` when absent. A present non-string
    /// value is a parameter error.
    pub fn string_param<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, RuleError> {
        match self.parameters.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(RuleError::InvalidParameter {
                rule_id: self.id.clone(),
                parameter: key.to_string(),
                message: "expected a string".to_string(),
            }),
        }
    }

    pub fn usize_param(&self, key: &str, default: usize) -> Result<usize, RuleError> {
        match self.parameters.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => v.as_u64().map(|n| n as usize).ok_or_else(|| RuleError::InvalidParameter {
                rule_id: self.id.clone(),
                parameter: key.to_string(),
                message: "expected a non-negative integer".to_string(),
            }),
        }
    }

    /// A violation of this rule at `line`.
    pub fn violation(&self, file: &str, line: usize, message: impl Into<String>) -> Violation {
        Violation::new(
            self.id.clone(),
            RULE_KIND,
            self.category.clone(),
            self.severity,
            message,
            file,
            line,
        )
    }
}

/// Everything an evaluator may look at.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub content: &'a str,
    /// Relative path, forward slashes.
    pub file: &'a str,
    pub rule: &'a Rule,
    pub profile: Option<&'a PatternProfile>,
    /// The engine's tokenizer, for rules that need declarations or imports.
    pub tokenizer: &'a dyn LexicalTokenizer,
}

impl std::fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("file", &self.file)
            .field("rule", &self.rule.id)
            .field("has_profile", &self.profile.is_some())
            .finish_non_exhaustive()
    }
}

/// A pure check for one rule id.
pub trait RuleEvaluator: Send + Sync {
    /// The `category/ruleId` this evaluator implements.
    fn rule_id(&self) -> &'static str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError>;
}
