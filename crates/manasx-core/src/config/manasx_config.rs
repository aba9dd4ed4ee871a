//! Top-level ManasX configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DetectConfig, LearnConfig, LoggingConfig, MonitorConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`MANASX_*`)
/// 3. Project config (`manasx.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ManasxConfig {
    pub learn: LearnConfig,
    pub detect: DetectConfig,
    pub monitor: MonitorConfig,
    pub logging: LoggingConfig,
}

/// Caller-supplied overrides that beat every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_files: Option<usize>,
    pub threshold: Option<u32>,
    pub include_info: Option<bool>,
    pub debounce_ms: Option<u64>,
    pub ai_detection: Option<bool>,
    pub log_dir: Option<String>,
}

impl ManasxConfig {
    /// Load configuration for the project at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        tracing::debug!(
            root = %root.display(),
            debounce_ms = config.monitor.effective_debounce_ms(),
            threshold = config.detect.effective_threshold(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ManasxConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.detect.threshold {
            if threshold > 100 {
                return Err(ConfigError::ValidationFailed {
                    field: "detect.threshold".to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if config.monitor.debounce_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "monitor.debounce_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.monitor.poll_interval_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "monitor.poll_interval_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.logging.max_log_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "logging.max_log_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.learn.max_files == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "learn.max_files".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ManasxConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ManasxConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    pub fn merge(base: &mut ManasxConfig, other: &ManasxConfig) {
        // Learn
        if other.learn.max_files.is_some() {
            base.learn.max_files = other.learn.max_files;
        }
        if !other.learn.extensions.is_empty() {
            base.learn.extensions = other.learn.extensions.clone();
        }
        if !other.learn.ignore_patterns.is_empty() {
            base.learn.ignore_patterns = other.learn.ignore_patterns.clone();
        }
        if other.learn.profile_path.is_some() {
            base.learn.profile_path = other.learn.profile_path.clone();
        }

        // Detect
        if other.detect.threshold.is_some() {
            base.detect.threshold = other.detect.threshold;
        }
        if other.detect.include_info.is_some() {
            base.detect.include_info = other.detect.include_info;
        }
        if other.detect.context_size.is_some() {
            base.detect.context_size = other.detect.context_size;
        }
        if !other.detect.blocked_modules.is_empty() {
            base.detect.blocked_modules = other.detect.blocked_modules.clone();
        }
        if other.detect.rules_file.is_some() {
            base.detect.rules_file = other.detect.rules_file.clone();
        }

        // Monitor
        if other.monitor.debounce_ms.is_some() {
            base.monitor.debounce_ms = other.monitor.debounce_ms;
        }
        if other.monitor.poll_interval_ms.is_some() {
            base.monitor.poll_interval_ms = other.monitor.poll_interval_ms;
        }
        if other.monitor.ai_detection.is_some() {
            base.monitor.ai_detection = other.monitor.ai_detection;
        }
        if other.monitor.drift_detection.is_some() {
            base.monitor.drift_detection = other.monitor.drift_detection;
        }
        if other.monitor.rule_checking.is_some() {
            base.monitor.rule_checking = other.monitor.rule_checking;
        }
        if other.monitor.classifier_timeout_ms.is_some() {
            base.monitor.classifier_timeout_ms = other.monitor.classifier_timeout_ms;
        }
        if other.monitor.recent_entries.is_some() {
            base.monitor.recent_entries = other.monitor.recent_entries;
        }

        // Logging
        if other.logging.log_dir.is_some() {
            base.logging.log_dir = other.logging.log_dir.clone();
        }
        if other.logging.max_log_size.is_some() {
            base.logging.max_log_size = other.logging.max_log_size;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(config: &mut ManasxConfig) {
        if let Ok(val) = std::env::var("MANASX_DEBOUNCE_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.monitor.debounce_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MANASX_LOG_DIR") {
            config.logging.log_dir = Some(val);
        }
        if let Ok(val) = std::env::var("MANASX_MAX_LOG_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.logging.max_log_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MANASX_MAX_FILES") {
            if let Ok(v) = val.parse::<usize>() {
                config.learn.max_files = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MANASX_AI_DETECTION") {
            if let Ok(v) = val.parse::<bool>() {
                config.monitor.ai_detection = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(config: &mut ManasxConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.max_files {
            config.learn.max_files = Some(v);
        }
        if let Some(v) = overrides.threshold {
            config.detect.threshold = Some(v);
        }
        if let Some(v) = overrides.include_info {
            config.detect.include_info = Some(v);
        }
        if let Some(v) = overrides.debounce_ms {
            config.monitor.debounce_ms = Some(v);
        }
        if let Some(v) = overrides.ai_detection {
            config.monitor.ai_detection = Some(v);
        }
        if let Some(ref v) = overrides.log_dir {
            config.logging.log_dir = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
