//! Inline suppression: `manasx-ignore` and `eslint-disable-next-line` comments.

const MARKERS: &[&str] = &["manasx-ignore", "eslint-disable-next-line"];

/// Checks whether a violation is suppressed by a comment on its own line or
/// the line above.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppressionChecker;

impl SuppressionChecker {
    pub fn new() -> Self {
        Self
    }

    /// `line` is 1-based. Supports:
    /// - `// manasx-ignore` suppresses every rule
    /// - `// manasx-ignore security/no-eval` suppresses one rule
    /// - `// manasx-ignore security/no-eval, no-sync-fs` suppresses several;
    ///   a bare rule name matches any category
    pub fn is_suppressed(&self, lines: &[&str], line: usize, rule_id: &str) -> bool {
        if line == 0 {
            return false;
        }
        let idx = line - 1;
        if lines.get(idx).is_some_and(|l| line_suppresses(l, rule_id)) {
            return true;
        }
        idx > 0
            && lines
                .get(idx - 1)
                .is_some_and(|l| line_suppresses(l, rule_id))
    }
}

fn line_suppresses(line: &str, rule_id: &str) -> bool {
    let trimmed = line.trim();
    MARKERS
        .iter()
        .filter_map(|marker| directive_rules(trimmed, marker))
        .any(|rules| rules.is_empty() || rules.iter().any(|r| rule_matches(r, rule_id)))
}

/// Rule list following `marker`, if the line carries it inside a comment.
/// An empty list means "all rules".
fn directive_rules<'a>(trimmed: &'a str, marker: &str) -> Option<Vec<&'a str>> {
    let pos = trimmed.find(marker)?;
    let before = &trimmed[..pos];
    if !before.contains("//") && !before.contains("/*") {
        return None;
    }
    let after = trimmed[pos + marker.len()..]
        .trim()
        .trim_end_matches("*/")
        .trim();
    // `-- reason` trails the rule list in eslint syntax.
    let after = after.split("--").next().unwrap_or_default();
    Some(
        after
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn rule_matches(listed: &str, rule_id: &str) -> bool {
    listed == rule_id
        || rule_id
            .rsplit_once('/')
            .is_some_and(|(_, name)| listed == name)
}
