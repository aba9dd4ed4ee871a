//! Bulk-fix rollups over violations sharing a type and category.

use manasx_core::types::Violation;

use super::types::BulkSuggestion;

/// One suggestion per `(type, category)` group with more than one member,
/// in order of first appearance.
pub fn bulk_suggestions(violations: &[Violation]) -> Vec<BulkSuggestion> {
    let mut groups: Vec<((&str, &str), Vec<usize>)> = Vec::new();
    for v in violations {
        let key = (v.kind.as_str(), v.category.as_str());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, lines)) => lines.push(v.line),
            None => groups.push((key, vec![v.line])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, lines)| lines.len() > 1)
        .map(|((kind, category), lines)| {
            let listed = lines
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            BulkSuggestion {
                kind: kind.to_string(),
                category: category.to_string(),
                count: lines.len(),
                message: format!(
                    "Fix {} {kind} issues ({category}) together at lines {listed}",
                    lines.len()
                ),
                lines,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use manasx_core::types::Severity;

    fn v(kind: &str, category: &str, line: usize) -> Violation {
        Violation::new("drift/x", kind, category, Severity::Low, "m", "a.js", line)
    }

    #[test]
    fn only_groups_with_several_members() {
        let violations = vec![
            v("naming", "variables", 3),
            v("imports", "style", 1),
            v("naming", "variables", 9),
        ];
        let out = bulk_suggestions(&violations);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, "naming");
        assert_eq!(out[0].lines, vec![3, 9]);
        assert!(out[0].message.contains("3, 9"));
    }
}
