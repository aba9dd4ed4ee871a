//! Built-in rule configuration, used when no file is found and written by
//! `create_initial_config`.

use std::collections::BTreeMap;

use chrono::Utc;
use manasx_core::constants::DEFAULT_FETCH_WRAPPER;
use manasx_core::types::Severity;
use serde_json::{json, Map, Value};

use super::config::{GlobalSettings, RuleCategory, RuleConfig, RuleDefinition, RuleMetadata};
use super::types::AI_CODE_CATEGORY;

fn rule(name: &str, description: &str, severity: Severity, parameters: Value) -> RuleDefinition {
    RuleDefinition {
        name: name.to_string(),
        description: description.to_string(),
        severity: Some(severity),
        enabled: true,
        parameters: match parameters {
            Value::Object(map) => map,
            _ => Map::new(),
        },
    }
}

fn category(rules: Vec<(&str, RuleDefinition)>) -> RuleCategory {
    RuleCategory {
        enabled: true,
        rules: rules
            .into_iter()
            .map(|(id, def)| (id.to_string(), def))
            .collect(),
    }
}

impl RuleConfig {
    /// The built-in organizational rule set.
    pub fn default_config() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            "security".to_string(),
            category(vec![
                (
                    "no-eval",
                    rule(
                        "No eval",
                        "Disallow eval(), which executes arbitrary strings as code",
                        Severity::Critical,
                        Value::Null,
                    ),
                ),
                (
                    "no-dangerous-html",
                    rule(
                        "No dangerous HTML",
                        "Disallow innerHTML/outerHTML, which open XSS holes",
                        Severity::High,
                        Value::Null,
                    ),
                ),
            ]),
        );
        rules.insert(
            "api".to_string(),
            category(vec![(
                "require-company-fetch",
                rule(
                    "Require company fetch wrapper",
                    "Network calls go through the shared fetch wrapper",
                    Severity::Medium,
                    json!({ "wrapperName": DEFAULT_FETCH_WRAPPER }),
                ),
            )]),
        );
        rules.insert(
            "performance".to_string(),
            category(vec![(
                "no-sync-fs",
                rule(
                    "No synchronous fs",
                    "Blocking file-system calls stall the event loop",
                    Severity::High,
                    Value::Null,
                ),
            )]),
        );
        rules.insert(
            "architecture".to_string(),
            category(vec![(
                "feature-folder-structure",
                rule(
                    "Feature folder structure",
                    "Source files live at least two folders deep",
                    Severity::Medium,
                    json!({ "minDepth": 2 }),
                ),
            )]),
        );
        rules.insert(
            "naming".to_string(),
            category(vec![(
                "camelcase-variable-naming",
                rule(
                    "camelCase variables",
                    "Variables use camelCase when the learned profile says so",
                    Severity::Low,
                    Value::Null,
                ),
            )]),
        );
        rules.insert(
            AI_CODE_CATEGORY.to_string(),
            category(vec![
                (
                    "require-review-marker",
                    rule(
                        "Require review marker",
                        "AI-generated code carries a human review marker",
                        Severity::Medium,
                        json!({ "marker": "@ai-reviewed" }),
                    ),
                ),
                (
                    "no-placeholder-code",
                    rule(
                        "No placeholder code",
                        "AI-generated code must not ship TODO stubs or placeholders",
                        Severity::Medium,
                        Value::Null,
                    ),
                ),
            ]),
        );

        Self {
            metadata: RuleMetadata {
                version: "1.0.0".to_string(),
                name: "Organization rules".to_string(),
                description: "Default ManasX governance rules".to_string(),
                author: String::new(),
                created: Utc::now().format("%Y-%m-%d").to_string(),
            },
            global: GlobalSettings {
                severity: Severity::Medium,
                autofix: false,
            },
            rules,
            exceptions: Vec::new(),
        }
    }
}
