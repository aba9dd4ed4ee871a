//! Property tests: score bounds, monotonicity, and classifier stability.

use manasx_analysis::drift::{compliance_score, directory_score};
use manasx_analysis::rules::RuleConfig;
use manasx_analysis::RuleEngine;
use manasx_core::types::{NamingConvention, Severity, Violation};
use proptest::prelude::*;

fn severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn violation(severity: Severity) -> Violation {
    Violation::new("drift/naming", "naming", "variables", severity, "m", "a.js", 1)
}

proptest! {
    #[test]
    fn score_stays_in_bounds(sevs in prop::collection::vec(severity(), 0..80)) {
        let violations: Vec<Violation> = sevs.into_iter().map(violation).collect();
        let score = compliance_score(&violations);
        prop_assert!(score <= 100);
    }

    #[test]
    fn adding_a_violation_never_raises_the_score(
        sevs in prop::collection::vec(severity(), 0..40),
        extra in severity(),
    ) {
        let mut violations: Vec<Violation> = sevs.into_iter().map(violation).collect();
        let before = compliance_score(&violations);
        violations.push(violation(extra));
        prop_assert!(compliance_score(&violations) <= before);
    }

    #[test]
    fn directory_score_is_between_min_and_max(scores in prop::collection::vec(0u32..=100, 1..50)) {
        let overall = directory_score(&scores);
        let min = *scores.iter().min().unwrap();
        let max = *scores.iter().max().unwrap();
        prop_assert!(overall >= min && overall <= max);
    }

    #[test]
    fn converted_names_are_accepted(name in "[a-z]{1,6}(_[a-z]{1,6}){0,3}") {
        for convention in [
            NamingConvention::CamelCase,
            NamingConvention::SnakeCase,
            NamingConvention::PascalCase,
            NamingConvention::KebabCase,
            NamingConvention::UpperCase,
        ] {
            let converted = convention.convert(&name);
            prop_assert!(convention.accepts(&converted), "{} -> {}", name, converted);
        }
    }

    #[test]
    fn rule_engine_never_panics(content in "\\PC{0,200}") {
        let engine = RuleEngine::new(RuleConfig::default_config());
        let _ = engine.apply_rules("src/a/b.js", &content, None);
        let _ = engine.apply_ai_rules("src/a/b.js", &content);
    }
}
