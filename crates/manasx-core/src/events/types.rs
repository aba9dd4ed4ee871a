//! Event payload types for the monitor lifecycle.

use std::path::PathBuf;

use crate::types::{AnalysisResult, MonitorStats, Violation};

/// Payload for `on_monitor_started`.
#[derive(Debug, Clone)]
pub struct MonitorStartedEvent {
    pub root: PathBuf,
    pub files_watched: usize,
    pub has_profile: bool,
    pub has_rules: bool,
}

/// Payload for `on_file_analyzed`.
#[derive(Debug, Clone)]
pub struct FileAnalyzedEvent {
    pub result: AnalysisResult,
    pub duration_ms: u64,
}

/// Payload for `on_violation_detected`.
#[derive(Debug, Clone)]
pub struct ViolationDetectedEvent {
    pub file: String,
    pub violation: Violation,
}

/// Payload for `on_monitor_stopped`.
#[derive(Debug, Clone)]
pub struct MonitorStoppedEvent {
    pub uptime_ms: u64,
    pub stats: MonitorStats,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
    pub file: Option<String>,
    pub stage: Option<String>,
}
