//! Built-in rule evaluators, one module per category.

pub mod ai_code;
pub mod api;
pub mod architecture;
pub mod naming;
pub mod performance;
pub mod security;

use std::sync::LazyLock;

use regex::Regex;

use super::types::RuleEvaluator;
use crate::tokenizer::line_col;

macro_rules! rule_pattern {
    ($name:ident, $regex_str:expr) => {
        pub(crate) static $name: std::sync::LazyLock<Option<regex::Regex>> =
            std::sync::LazyLock::new(|| regex::Regex::new($regex_str).ok());
    };
}
pub(crate) use rule_pattern;

/// Every built-in evaluator.
pub fn builtins() -> Vec<Box<dyn RuleEvaluator>> {
    vec![
        Box::new(security::NoEval),
        Box::new(security::NoDangerousHtml),
        Box::new(api::RequireCompanyFetch),
        Box::new(performance::NoSyncFs),
        Box::new(architecture::FeatureFolderStructure),
        Box::new(naming::CamelCaseVariableNaming),
        Box::new(ai_code::RequireReviewMarker),
        Box::new(ai_code::NoPlaceholderCode),
    ]
}

/// One pattern hit in code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit<'t> {
    pub line: usize,
    pub column: usize,
    pub text: &'t str,
}

/// Hits of `pattern` that do not sit on a comment line.
pub fn code_hits<'t>(pattern: &LazyLock<Option<Regex>>, content: &'t str) -> Vec<Hit<'t>> {
    let Some(re) = pattern.as_ref() else {
        return Vec::new();
    };
    let lines: Vec<&str> = content.lines().collect();
    re.find_iter(content)
        .filter_map(|m| {
            let (line, column) = line_col(content, m.start());
            let text = lines.get(line - 1).copied().unwrap_or_default();
            if is_comment_line(text) || in_trailing_comment(text, column) {
                return None;
            }
            Some(Hit {
                line,
                column,
                text: m.as_str(),
            })
        })
        .collect()
}

/// Every hit, comment lines included.
pub fn all_hits<'t>(pattern: &LazyLock<Option<Regex>>, content: &'t str) -> Vec<Hit<'t>> {
    let Some(re) = pattern.as_ref() else {
        return Vec::new();
    };
    re.find_iter(content)
        .map(|m| {
            let (line, column) = line_col(content, m.start());
            Hit {
                line,
                column,
                text: m.as_str(),
            }
        })
        .collect()
}

fn is_comment_line(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("//") || t.starts_with("/*") || t.starts_with('*')
}

/// True when a `//` before `column` (1-based, chars) opens a line comment.
fn in_trailing_comment(line: &str, column: usize) -> bool {
    let prefix: String = line.chars().take(column.saturating_sub(1)).collect();
    match prefix.find("//") {
        // `://` is a URL, not a comment.
        Some(pos) => !prefix[..pos].ends_with(':'),
        None => false,
    }
}
