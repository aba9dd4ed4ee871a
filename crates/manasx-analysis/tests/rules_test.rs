//! Rule engine: configuration, built-in rules, exceptions, suppression and
//! evaluator isolation.

use std::sync::Arc;

use chrono::Utc;
use manasx_analysis::learning::consolidate;
use manasx_analysis::rules::{Rule, RuleConfig, RuleContext, RuleEngine, RuleEvaluator};
use manasx_analysis::tokenizer::{
    CommentStats, DeclKind, Declaration, ImportRef, LexicalTokenizer,
};
use manasx_core::errors::{ConfigError, RuleError};
use manasx_core::types::profile::{ExportStyle, RawCounts};
use manasx_core::types::{NamingConvention, Severity, Violation};

fn engine_with_exceptions(exceptions: serde_json::Value) -> RuleEngine {
    let mut value = serde_json::to_value(RuleConfig::default_config()).unwrap();
    value["exceptions"] = exceptions;
    let config = RuleConfig::from_json_str(&value.to_string(), "<test>").unwrap();
    RuleEngine::new(config)
}

// ─── Built-in rules ─────────────────────────────────────────────────────

#[test]
fn eval_is_critical() {
    let engine = RuleEngine::new(RuleConfig::default_config());
    let violations = engine.apply_rules("src/feature/a.js", "eval(userInput)\n", None);
    assert_eq!(violations.len(), 1);
    let v = &violations[0];
    assert_eq!(v.rule_id, "security/no-eval");
    assert_eq!(v.severity, Severity::Critical);
    assert_eq!(v.line, 1);
    assert_eq!(v.kind, "rule");
}

#[test]
fn each_builtin_fires() {
    let engine = RuleEngine::new(RuleConfig::default_config());
    let src = "el.innerHTML = html;\nconst r = await fetch('/api');\nconst s = fs.readFileSync(p);\n";
    let ids: Vec<String> = engine
        .apply_rules("src/feature/a.js", src, None)
        .into_iter()
        .map(|v| v.rule_id)
        .collect();
    assert_eq!(
        ids,
        vec![
            "api/require-company-fetch",
            "performance/no-sync-fs",
            "security/no-dangerous-html",
        ]
    );
}

#[test]
fn shallow_file_breaks_folder_structure() {
    let engine = RuleEngine::new(RuleConfig::default_config());
    let violations = engine.apply_rules("index.js", "const a = 1;\n", None);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule_id, "architecture/feature-folder-structure");
}

#[test]
fn wrapper_definition_may_call_fetch() {
    let engine = RuleEngine::new(RuleConfig::default_config());
    let src = "export function companyFetch(url) {\n  return fetch(url);\n}\n";
    assert!(engine.apply_rules("src/api/http.js", src, None).is_empty());
}

#[test]
fn naming_rule_follows_profile() {
    let engine = RuleEngine::new(RuleConfig::default_config());
    let src = "let user_name = 1;\n";
    assert!(engine.apply_rules("src/a/b.js", src, None).is_empty());

    let mut profile = consolidate(RawCounts::default(), Utc::now());
    profile.recommendations.naming.variables = Some(NamingConvention::CamelCase);
    let violations = engine.apply_rules("src/a/b.js", src, Some(&profile));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule_id, "naming/camelcase-variable-naming");
    assert_eq!(violations[0].column, Some(5));
}

/// Reports one fixed declaration whatever the source says.
struct OneDeclaration;

impl LexicalTokenizer for OneDeclaration {
    fn declarations(&self, content: &str) -> Vec<Declaration> {
        vec![Declaration {
            kind: DeclKind::Variable,
            name: "row_count".to_string(),
            offset: content.find("row").unwrap_or(0),
        }]
    }

    fn imports(&self, _content: &str) -> Vec<ImportRef> {
        Vec::new()
    }

    fn export_style(&self, _content: &str) -> Option<ExportStyle> {
        None
    }

    fn comments(&self, _content: &str) -> CommentStats {
        CommentStats::default()
    }
}

#[test]
fn naming_rule_uses_engine_tokenizer() {
    let engine =
        RuleEngine::new(RuleConfig::default_config()).with_tokenizer(Arc::new(OneDeclaration));
    let mut profile = consolidate(RawCounts::default(), Utc::now());
    profile.recommendations.naming.variables = Some(NamingConvention::CamelCase);

    // The regex tokenizer finds nothing declared here.
    let src = "print(rows);\n";
    let violations = engine.apply_rules("src/a/b.js", src, Some(&profile));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule_id, "naming/camelcase-variable-naming");
    assert!(violations[0].suggestion.as_deref().unwrap().contains("rowCount"));
}

#[test]
fn commented_out_code_is_ignored() {
    let engine = RuleEngine::new(RuleConfig::default_config());
    let src = "// eval(x)\n/* el.innerHTML = y */\n";
    assert!(engine.apply_rules("src/a/b.js", src, None).is_empty());
}

#[test]
fn ai_rules_only_through_apply_ai_rules() {
    let engine = RuleEngine::new(RuleConfig::default_config());
    let src = "function load() {\n  // TODO: implement\n}\n";
    assert!(engine.apply_rules("src/a/b.js", src, None).is_empty());

    let ids: Vec<String> = engine
        .apply_ai_rules("src/a/b.js", src)
        .into_iter()
        .map(|v| v.rule_id)
        .collect();
    assert_eq!(
        ids,
        vec!["ai-code/no-placeholder-code", "ai-code/require-review-marker"]
    );

    let reviewed = "// @ai-reviewed\nfunction load() { return 1; }\n";
    assert!(engine.apply_ai_rules("src/a/b.js", reviewed).is_empty());
}

// ─── Exceptions and suppression ─────────────────────────────────────────

#[test]
fn directory_exception_suppresses_rule() {
    let engine = engine_with_exceptions(serde_json::json!([
        { "file": "legacy/*", "rule": "security/no-eval", "justification": "old code" }
    ]));
    assert!(engine.apply_rules("legacy/old/a.js", "eval(x)\n", None).is_empty());
    assert_eq!(engine.apply_rules("src/new/a.js", "eval(x)\n", None).len(), 1);
}

#[test]
fn wildcard_rule_exception_covers_all_rules() {
    let engine = engine_with_exceptions(serde_json::json!([{ "file": "a.js", "rule": "*" }]));
    assert!(engine
        .apply_rules("a.js", "eval(x); fs.readFileSync(p);\n", None)
        .is_empty());
    assert!(!engine.apply_rules("b.js", "eval(x)\n", None).is_empty());
}

#[test]
fn inline_suppression() {
    let engine = RuleEngine::new(RuleConfig::default_config());
    let src = "// manasx-ignore security/no-eval\neval(a);\neval(b);\n";
    let violations = engine.apply_rules("src/a/b.js", src, None);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, 3);
}

// ─── Configuration ──────────────────────────────────────────────────────

#[test]
fn initial_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manasx-rules.json");
    let written = RuleConfig::create_initial_config(&path).unwrap();
    assert_eq!(written.rule_count(), 8);

    let nested = dir.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();
    let (loaded, found) = RuleConfig::load(&nested, "manasx-rules.json").unwrap();
    assert_eq!(found.as_deref(), Some(path.as_path()));
    assert_eq!(loaded, written);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, found) = RuleConfig::load(dir.path(), "does-not-exist-manasx.json").unwrap();
    assert!(found.is_none());
    assert_eq!(config.rule_count(), 8);
}

#[test]
fn invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manasx-rules.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        RuleConfig::from_file(&path),
        Err(ConfigError::ParseError { .. })
    ));
    std::fs::write(&path, r#"{ "rules": {} }"#).unwrap();
    assert!(matches!(
        RuleConfig::from_file(&path),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

// ─── Evaluator isolation ────────────────────────────────────────────────

struct Exploding;

impl RuleEvaluator for Exploding {
    fn rule_id(&self) -> &'static str {
        "security/no-eval"
    }

    fn evaluate(&self, _ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        panic!("evaluator bug");
    }
}

struct BadParameter;

impl RuleEvaluator for BadParameter {
    fn rule_id(&self) -> &'static str {
        "performance/no-sync-fs"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let rule: &Rule = ctx.rule;
        Err(RuleError::InvalidParameter {
            rule_id: rule.id.clone(),
            parameter: "x".to_string(),
            message: "bad".to_string(),
        })
    }
}

#[test]
fn failing_evaluators_do_not_stop_other_rules() {
    let mut engine = RuleEngine::new(RuleConfig::default_config());
    engine.register(Box::new(Exploding));
    engine.register(Box::new(BadParameter));

    let src = "eval(x);\nfs.readFileSync(p);\nel.innerHTML = y;\n";
    let ids: Vec<String> = engine
        .apply_rules("src/a/b.js", src, None)
        .into_iter()
        .map(|v| v.rule_id)
        .collect();
    assert_eq!(ids, vec!["security/no-dangerous-html"]);
}
