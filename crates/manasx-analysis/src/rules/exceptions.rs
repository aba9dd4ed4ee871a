//! Exception matching.
//!
//! `file` matches exactly, or `*` for any file, or `dir/*` for any file
//! under `dir/`. `rule` matches exactly or `*`. No other glob syntax.

use super::config::RuleException;

/// The exceptions of one configuration.
#[derive(Debug, Clone, Default)]
pub struct ExceptionSet {
    exceptions: Vec<RuleException>,
}

impl ExceptionSet {
    pub fn new(exceptions: Vec<RuleException>) -> Self {
        Self { exceptions }
    }

    pub fn len(&self) -> usize {
        self.exceptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exceptions.is_empty()
    }

    /// Whether any exception covers `(file, rule_id)`.
    pub fn is_excepted(&self, file: &str, rule_id: &str) -> bool {
        self.exceptions.iter().any(|ex| {
            file_matches(ex.file.as_deref(), file) && rule_matches(ex.rule.as_deref(), rule_id)
        })
    }
}

fn file_matches(pattern: Option<&str>, file: &str) -> bool {
    let Some(pattern) = pattern else {
        return true;
    };
    let file = file.trim_start_matches("./");
    let pattern = pattern.trim_start_matches("./");
    if pattern == "*" || pattern == file {
        return true;
    }
    match pattern.strip_suffix("/*") {
        Some(dir) if !dir.is_empty() => file
            .strip_prefix(dir)
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false),
        _ => false,
    }
}

fn rule_matches(pattern: Option<&str>, rule_id: &str) -> bool {
    match pattern {
        None => true,
        Some(p) => p == "*" || p == rule_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(file: Option<&str>, rule: Option<&str>) -> RuleException {
        RuleException {
            file: file.map(str::to_string),
            rule: rule.map(str::to_string),
            justification: None,
        }
    }

    #[test]
    fn exact_and_wildcard() {
        let set = ExceptionSet::new(vec![ex(Some("a.js"), Some("*"))]);
        assert!(set.is_excepted("a.js", "security/no-eval"));
        assert!(set.is_excepted("./a.js", "api/require-company-fetch"));
        assert!(!set.is_excepted("b.js", "security/no-eval"));
    }

    #[test]
    fn directory_prefix() {
        let set = ExceptionSet::new(vec![ex(Some("legacy/*"), Some("security/no-eval"))]);
        assert!(set.is_excepted("legacy/old.js", "security/no-eval"));
        assert!(set.is_excepted("legacy/deep/old.js", "security/no-eval"));
        assert!(!set.is_excepted("legacy-new/old.js", "security/no-eval"));
        assert!(!set.is_excepted("legacy/old.js", "security/no-dangerous-html"));
    }

    #[test]
    fn glob_syntax_is_literal() {
        let set = ExceptionSet::new(vec![ex(Some("src/*.js"), None)]);
        assert!(!set.is_excepted("src/a.js", "security/no-eval"));
        assert!(set.is_excepted("src/*.js", "security/no-eval"));
    }

    #[test]
    fn missing_fields_match_everything() {
        let set = ExceptionSet::new(vec![ex(None, Some("naming/camelcase-variable-naming"))]);
        assert!(set.is_excepted("any/file.js", "naming/camelcase-variable-naming"));
        assert!(!set.is_excepted("any/file.js", "security/no-eval"));
    }
}
