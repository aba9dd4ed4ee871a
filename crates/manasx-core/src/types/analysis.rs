//! Per-file analysis results and monitor statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::violation::Violation;

/// Outcome of AI-provenance classification for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiDetection {
    #[serde(rename = "isLikelyAI")]
    pub is_likely_ai: bool,
    /// 0.0 - 1.0
    pub confidence: f64,
    #[serde(default)]
    pub indicators: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
}

impl AiDetection {
    /// The neutral result used whenever classification is unavailable.
    pub fn neutral() -> Self {
        Self {
            is_likely_ai: false,
            confidence: 0.0,
            indicators: Vec::new(),
            recommendation: String::new(),
        }
    }
}

/// Result of analyzing one file after one settled change. Logged and emitted,
/// then dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub file: String,
    pub timestamp: DateTime<Utc>,
    pub violations: Vec<Violation>,
    pub ai_detection: Option<AiDetection>,
    pub drift_score: Option<u32>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            timestamp: Utc::now(),
            violations: Vec::new(),
            ai_detection: None,
            drift_score: None,
            insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Process-wide monitor counters. Reset on every start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStats {
    pub files_watched: usize,
    pub changes_detected: u64,
    pub violations_found: u64,
    pub ai_code_detected: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub files_analyzed: u64,
    pub stage_errors: u64,
}

impl MonitorStats {
    /// Fresh counters stamped with the current time.
    pub fn started_now(files_watched: usize) -> Self {
        Self {
            files_watched,
            start_time: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Milliseconds since `start_time`, zero when never started.
    pub fn uptime_ms(&self) -> u64 {
        self.start_time
            .map(|t| (Utc::now() - t).num_milliseconds().max(0) as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_detection_wire_names() {
        let mut detection = AiDetection::neutral();
        detection.is_likely_ai = true;
        let value = serde_json::to_value(&detection).unwrap();
        assert_eq!(value["isLikelyAI"], true);
        assert!(value.get("isLikelyAi").is_none());

        let mut result = AnalysisResult::new("src/a.js");
        result.ai_detection = Some(detection);
        let text = serde_json::to_string(&result).unwrap();
        assert!(text.contains(r#""aiDetection":{"isLikelyAI":true"#));
        let back: AnalysisResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }
}
