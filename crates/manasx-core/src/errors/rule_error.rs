//! Rule evaluation errors.

use super::error_code::{self, ManasxErrorCode};

/// Errors raised by a single rule evaluator. Isolated to that rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid parameter {parameter} for rule {rule_id}: {message}")]
    InvalidParameter {
        rule_id: String,
        parameter: String,
        message: String,
    },

    #[error("Rule {rule_id} panicked: {message}")]
    EvaluatorPanic { rule_id: String, message: String },
}

impl ManasxErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
