//! Compiled lexical patterns. A pattern that fails to compile yields `None`
//! and simply matches nothing.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! lexical_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Declarations ───────────────────────────────────────────────────────────
lexical_pattern!(
    RE_BINDING,
    r"\b(const|let|var)\s+([A-Za-z_$][\w$]*)\s*(=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>))?"
);
lexical_pattern!(RE_FUNCTION, r"\bfunction\b\s*\*?\s*([A-Za-z_$][\w$]*)\s*\(");

// ── Imports ────────────────────────────────────────────────────────────────
lexical_pattern!(
    RE_ES_IMPORT,
    r#"(?m)^\s*import\s+(?:[^'";]*?\s*from\s*)?['"]([^'"]+)['"]"#
);
lexical_pattern!(RE_REQUIRE, r#"\brequire\s*\(\s*['"]([^'"]+)['"]\s*\)"#);
lexical_pattern!(RE_DYNAMIC_IMPORT, r#"\bimport\s*\(\s*['"]([^'"]+)['"]\s*\)"#);

// ── Exports ────────────────────────────────────────────────────────────────
lexical_pattern!(
    RE_NAMED_EXPORT,
    r"(?m)^\s*export\s+(?:const|let|var|function|class|async\s+function|\{|\*)|\b(?:module\.)?exports\.[A-Za-z_$][\w$]*\s*="
);
lexical_pattern!(
    RE_DEFAULT_EXPORT,
    r"(?m)^\s*export\s+default\b|\bmodule\.exports\s*="
);

/// Match iterator over an optional pattern; empty when it failed to compile.
pub fn captures<'r, 't>(
    pattern: &'r LazyLock<Option<Regex>>,
    text: &'t str,
) -> impl Iterator<Item = regex::Captures<'t>> + 'r
where
    't: 'r,
{
    pattern
        .as_ref()
        .into_iter()
        .flat_map(move |re| re.captures_iter(text))
}

pub fn is_match(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().map(|re| re.is_match(text)).unwrap_or(false)
}
