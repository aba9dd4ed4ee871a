//! Rule configuration: the versioned JSON document, its discovery and validation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use manasx_core::errors::ConfigError;
use manasx_core::types::Severity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::{Rule, KNOWN_CATEGORIES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Severity for rules that do not set their own.
    #[serde(default = "default_global_severity")]
    pub severity: Severity,
    #[serde(default)]
    pub autofix: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            severity: default_global_severity(),
            autofix: false,
        }
    }
}

fn default_global_severity() -> Severity {
    Severity::Medium
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCategory {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub rules: BTreeMap<String, RuleDefinition>,
}

/// A suppression of `(file, rule)` pairs. A missing field matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleException {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

/// The rule configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    pub metadata: RuleMetadata,
    #[serde(default)]
    pub global: GlobalSettings,
    pub rules: BTreeMap<String, RuleCategory>,
    #[serde(default)]
    pub exceptions: Vec<RuleException>,
}

/// Trimmed view for the organizational context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfigSummary {
    pub name: String,
    pub version: String,
    pub total_rules: usize,
    pub enabled_rules: usize,
    pub categories: Vec<String>,
    pub exceptions: usize,
}

impl RuleConfig {
    /// Search `start_dir` and each ancestor for `file_name`.
    pub fn find(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
    }

    /// Resolve `file_name` upward from `start_dir` and load it. Falls back to
    /// the built-in defaults when no file exists anywhere up the tree. A file
    /// that exists but is invalid is an error.
    pub fn load(start_dir: &Path, file_name: &str) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match Self::find(start_dir, file_name) {
            Some(path) => {
                let config = Self::from_file(&path)?;
                tracing::info!(
                    path = %path.display(),
                    rules = config.rule_count(),
                    "rule configuration loaded"
                );
                Ok((config, Some(path)))
            }
            None => {
                tracing::info!(
                    start = %start_dir.display(),
                    file_name,
                    "no rule configuration found, using defaults"
                );
                Ok((Self::default_config(), None))
            }
        }
    }

    /// Load and validate a specific file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_json_str(&text, &path.display().to_string())
    }

    /// Parse and validate a JSON document. `origin` names it in errors.
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&value)?;
        serde_json::from_value(value).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Structural validation ahead of typed parsing. Unknown categories are
    /// warned about, never rejected.
    pub fn validate(value: &Value) -> Result<(), ConfigError> {
        let missing = |field: &str| ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "is required".to_string(),
        };
        let metadata = value.get("metadata").ok_or_else(|| missing("metadata"))?;
        for field in ["version", "name"] {
            match metadata.get(field) {
                Some(Value::String(s)) if !s.trim().is_empty() => {}
                _ => return Err(missing(&format!("metadata.{field}"))),
            }
        }
        let rules = value.get("rules").ok_or_else(|| missing("rules"))?;
        let Some(categories) = rules.as_object() else {
            return Err(ConfigError::ValidationFailed {
                field: "rules".to_string(),
                message: "must be an object of categories".to_string(),
            });
        };
        for category in categories.keys() {
            if !KNOWN_CATEGORIES.contains(&category.as_str()) {
                tracing::warn!(category = %category, "unknown rule category, keeping it");
            }
        }
        Ok(())
    }

    /// Write the default configuration to `path`, overwriting, and return it.
    pub fn create_initial_config(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::default_config();
        config.save(path)?;
        tracing::info!(path = %path.display(), "initial rule configuration written");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_failed = |message: String| ConfigError::WriteFailed {
            path: path.display().to_string(),
            message,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(path, format!("{json}\n")).map_err(|e| write_failed(e.to_string()))
    }

    /// Every rule definition, enabled or not.
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(|c| c.rules.len()).sum()
    }

    /// Enabled rules of enabled categories, with effective severity.
    pub fn resolved_rules(&self) -> Vec<Rule> {
        let mut resolved = Vec::new();
        for (category_name, category) in &self.rules {
            if !category.enabled {
                continue;
            }
            for (rule_name, def) in &category.rules {
                if !def.enabled {
                    continue;
                }
                resolved.push(Rule {
                    id: format!("{category_name}/{rule_name}"),
                    category: category_name.clone(),
                    name: if def.name.is_empty() {
                        rule_name.clone()
                    } else {
                        def.name.clone()
                    },
                    description: def.description.clone(),
                    severity: def.severity.unwrap_or(self.global.severity),
                    parameters: def.parameters.clone(),
                });
            }
        }
        resolved
    }

    pub fn summary(&self) -> RuleConfigSummary {
        RuleConfigSummary {
            name: self.metadata.name.clone(),
            version: self.metadata.version.clone(),
            total_rules: self.rule_count(),
            enabled_rules: self.resolved_rules().len(),
            categories: self.rules.keys().cloned().collect(),
            exceptions: self.exceptions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_requires_metadata_and_rules() {
        let no_rules = serde_json::json!({ "metadata": { "version": "1.0.0", "name": "x" } });
        assert!(matches!(
            RuleConfig::validate(&no_rules),
            Err(ConfigError::ValidationFailed { ref field, .. }) if field == "rules"
        ));

        let no_name = serde_json::json!({ "metadata": { "version": "1.0.0" }, "rules": {} });
        assert!(matches!(
            RuleConfig::validate(&no_name),
            Err(ConfigError::ValidationFailed { ref field, .. }) if field == "metadata.name"
        ));
    }

    #[test]
    fn unknown_category_is_accepted() {
        let text = r#"{
            "metadata": { "version": "1.0.0", "name": "custom" },
            "rules": { "futuristic": { "enabled": true, "rules": { "x": { "severity": "low" } } } }
        }"#;
        let config = RuleConfig::from_json_str(text, "<test>").unwrap();
        assert_eq!(config.rule_count(), 1);
        let rules = config.resolved_rules();
        assert_eq!(rules[0].id, "futuristic/x");
        assert_eq!(rules[0].severity, Severity::Low);
    }

    #[test]
    fn disabled_entries_are_not_resolved() {
        let text = r#"{
            "metadata": { "version": "1", "name": "n" },
            "global": { "severity": "high" },
            "rules": {
                "security": { "enabled": false, "rules": { "no-eval": {} } },
                "api": { "rules": { "a": {}, "b": { "enabled": false } } }
            }
        }"#;
        let config = RuleConfig::from_json_str(text, "<test>").unwrap();
        let rules = config.resolved_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "api/a");
        assert_eq!(rules[0].severity, Severity::High);
        assert_eq!(config.summary().enabled_rules, 1);
        assert_eq!(config.summary().total_rules, 3);
    }
}
