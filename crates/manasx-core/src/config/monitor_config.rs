//! Continuous monitor configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CLASSIFIER_TIMEOUT_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_RECENT_ENTRIES,
};

/// Configuration for the continuous monitor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Quiet period after the last change before a file is analyzed. Default: 1000ms.
    pub debounce_ms: Option<u64>,
    /// Polling interval of the file watcher. Default: 500ms.
    pub poll_interval_ms: Option<u64>,
    /// Run the AI-provenance classifier on each change. Default: false.
    pub ai_detection: Option<bool>,
    /// Run the drift detector when a profile is loaded. Default: true.
    pub drift_detection: Option<bool>,
    /// Run the rule engine when a rule configuration is loaded. Default: true.
    pub rule_checking: Option<bool>,
    /// Timeout for a single classifier call. Default: 30000ms.
    pub classifier_timeout_ms: Option<u64>,
    /// Number of recent analyzed files in the organizational context. Default: 10.
    pub recent_entries: Option<usize>,
}

impl MonitorConfig {
    pub fn effective_debounce_ms(&self) -> u64 {
        self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    pub fn effective_poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS)
    }

    pub fn effective_ai_detection(&self) -> bool {
        self.ai_detection.unwrap_or(false)
    }

    pub fn effective_drift_detection(&self) -> bool {
        self.drift_detection.unwrap_or(true)
    }

    pub fn effective_rule_checking(&self) -> bool {
        self.rule_checking.unwrap_or(true)
    }

    pub fn effective_classifier_timeout_ms(&self) -> u64 {
        self.classifier_timeout_ms
            .unwrap_or(DEFAULT_CLASSIFIER_TIMEOUT_MS)
    }

    pub fn effective_recent_entries(&self) -> usize {
        self.recent_entries.unwrap_or(DEFAULT_RECENT_ENTRIES)
    }
}
