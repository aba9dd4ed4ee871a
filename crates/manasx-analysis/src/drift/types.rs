//! Drift detector options and results.

use std::collections::BTreeMap;

use manasx_core::config::DetectConfig;
use manasx_core::constants::{DEFAULT_BLOCKED_MODULES, DEFAULT_CONTEXT_SIZE, DEFAULT_DRIFT_THRESHOLD};
use manasx_core::types::Violation;
use serde::{Deserialize, Serialize};

/// Knobs of a drift run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftOptions {
    /// Files scoring below this (0-100) are drifted.
    pub threshold: u32,
    /// Keep info-level violations in the result and the score.
    pub include_info: bool,
    /// Lines of context either side of a violation; 0 disables context.
    pub context_size: usize,
    /// Module specifiers that are always drift.
    pub blocked_modules: Vec<String>,
}

impl Default for DriftOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DRIFT_THRESHOLD,
            include_info: false,
            context_size: DEFAULT_CONTEXT_SIZE,
            blocked_modules: DEFAULT_BLOCKED_MODULES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DriftOptions {
    pub fn from_config(config: &DetectConfig) -> Self {
        Self {
            threshold: config.effective_threshold(),
            include_info: config.effective_include_info(),
            context_size: config.effective_context_size(),
            blocked_modules: config.effective_blocked_modules(),
        }
    }
}

/// Several violations of the same type and category, fixable together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub count: usize,
    pub lines: Vec<usize>,
    pub message: String,
}

/// Violation counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftSummary {
    pub total: usize,
    pub by_severity: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

impl DriftSummary {
    pub fn from_violations<'a>(violations: impl IntoIterator<Item = &'a Violation>) -> Self {
        let mut summary = Self::default();
        for v in violations {
            summary.total += 1;
            *summary.by_severity.entry(v.severity.to_string()).or_default() += 1;
            *summary.by_type.entry(v.kind.clone()).or_default() += 1;
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDriftResult {
    pub file: String,
    pub violations: Vec<Violation>,
    pub compliance_score: u32,
    pub drifted: bool,
    pub summary: DriftSummary,
    pub suggestions: Vec<BulkSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryDriftResult {
    pub directory: String,
    pub files: Vec<FileDriftResult>,
    pub files_analyzed: usize,
    pub drifted_files: usize,
    /// Rounded mean of per-file scores; 100 when no file was analyzable.
    pub overall_score: u32,
    pub drifted: bool,
    pub summary: DriftSummary,
}

/// `detect_drift` dispatches on whether the path is a file or a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DriftResult {
    File(FileDriftResult),
    Directory(DirectoryDriftResult),
}

impl DriftResult {
    pub fn score(&self) -> u32 {
        match self {
            Self::File(f) => f.compliance_score,
            Self::Directory(d) => d.overall_score,
        }
    }
}
