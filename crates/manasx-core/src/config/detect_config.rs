//! Drift detection and rule checking configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BLOCKED_MODULES, DEFAULT_CONTEXT_SIZE, DEFAULT_DRIFT_THRESHOLD, DEFAULT_RULES_FILE,
};

/// Configuration for the drift detector and rule engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectConfig {
    /// Compliance score below which a file counts as drifted (0-100). Default: 80.
    pub threshold: Option<u32>,
    /// Keep info-level findings in results. Default: false.
    pub include_info: Option<bool>,
    /// Lines of surrounding text attached to each violation. Default: 2.
    pub context_size: Option<usize>,
    /// Modules whose import is always drift. Empty means the defaults.
    #[serde(default)]
    pub blocked_modules: Vec<String>,
    /// Rule configuration file name, searched upward. Default: `manasx-rules.json`.
    pub rules_file: Option<String>,
}

impl DetectConfig {
    pub fn effective_threshold(&self) -> u32 {
        self.threshold.unwrap_or(DEFAULT_DRIFT_THRESHOLD)
    }

    pub fn effective_include_info(&self) -> bool {
        self.include_info.unwrap_or(false)
    }

    pub fn effective_context_size(&self) -> usize {
        self.context_size.unwrap_or(DEFAULT_CONTEXT_SIZE)
    }

    pub fn effective_blocked_modules(&self) -> Vec<String> {
        if self.blocked_modules.is_empty() {
            DEFAULT_BLOCKED_MODULES.iter().map(|s| s.to_string()).collect()
        } else {
            self.blocked_modules.clone()
        }
    }

    pub fn effective_rules_file(&self) -> String {
        self.rules_file
            .clone()
            .unwrap_or_else(|| DEFAULT_RULES_FILE.to_string())
    }
}
