//! Per-file analysis: AI, drift and rule stages, each isolated.
//!
//! Stages run in that order on the same content. A stage that panics is
//! recorded as a `StageFailure` and contributes nothing; the others still
//! run and their violations are concatenated as-is.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use manasx_analysis::ai::{AiClassifier, AiCodeDetector};
use manasx_analysis::drift::{DriftDetector, DriftOptions};
use manasx_analysis::rules::RuleEngine;
use manasx_core::config::ManasxConfig;
use manasx_core::types::profile::PatternProfile;
use manasx_core::types::AnalysisResult;

use crate::context::MonitorContext;

/// Recommendations kept per result.
const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: &'static str,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub result: AnalysisResult,
    pub failures: Vec<StageFailure>,
}

/// Runs the enabled stages for one file. Built once per monitor start.
pub struct FileAnalyzer {
    ai: Option<AiCodeDetector>,
    drift: Option<DriftDetector>,
    rules: Option<RuleEngine>,
    rule_checking: bool,
    profile: Option<Arc<PatternProfile>>,
}

impl FileAnalyzer {
    pub fn new(
        context: &MonitorContext,
        config: &ManasxConfig,
        classifier: Arc<dyn AiClassifier>,
    ) -> Self {
        let monitor = &config.monitor;
        let ai = monitor.effective_ai_detection().then(|| {
            AiCodeDetector::new(
                classifier,
                Duration::from_millis(monitor.effective_classifier_timeout_ms()),
            )
        });
        let drift = match (&context.profile, monitor.effective_drift_detection()) {
            (Some(profile), true) => Some(DriftDetector::new(
                Arc::clone(profile),
                DriftOptions::from_config(&config.detect),
            )),
            _ => None,
        };
        Self {
            ai,
            drift,
            rules: context.rules.clone().map(RuleEngine::new),
            rule_checking: monitor.effective_rule_checking(),
            profile: context.profile.clone(),
        }
    }

    /// Stages that will run, for logging.
    pub fn enabled_stages(&self) -> Vec<&'static str> {
        let mut stages = Vec::new();
        if self.ai.is_some() {
            stages.push("ai");
        }
        if self.drift.is_some() {
            stages.push("drift");
        }
        if self.rules.is_some() && self.rule_checking {
            stages.push("rules");
        }
        stages
    }

    pub async fn analyze(&self, relative_path: &str, content: &str) -> FileAnalysis {
        let mut result = AnalysisResult::new(relative_path);
        let mut failures = Vec::new();

        // AI provenance, then AI-only rules on flagged content.
        if let Some(detector) = &self.ai {
            let detector = detector.clone();
            let (text, file) = (content.to_string(), relative_path.to_string());
            match tokio::spawn(async move { detector.detect(&text, &file).await }).await {
                Ok(Some(detection)) => {
                    if detection.is_likely_ai {
                        result.insights.push(format!(
                            "Likely AI-generated ({:.0}% confidence)",
                            detection.confidence * 100.0
                        ));
                        if let Some(engine) = &self.rules {
                            match isolated("ai-rules", || engine.apply_ai_rules(relative_path, content)) {
                                Ok(found) => result.violations.extend(found),
                                Err(f) => failures.push(f),
                            }
                        }
                    }
                    result.ai_detection = Some(detection);
                }
                Ok(None) => {}
                Err(e) => failures.push(StageFailure {
                    stage: "ai",
                    message: e.to_string(),
                }),
            }
        }

        if let Some(drift) = &self.drift {
            match isolated("drift", || drift.analyze_content(relative_path, content)) {
                Ok(drift_result) => {
                    if drift_result.drifted {
                        result.insights.push(format!(
                            "Drifted from project patterns (compliance {}/100)",
                            drift_result.compliance_score
                        ));
                    }
                    result.drift_score = Some(drift_result.compliance_score);
                    result.violations.extend(drift_result.violations);
                }
                Err(f) => failures.push(f),
            }
        }

        if let (Some(engine), true) = (&self.rules, self.rule_checking) {
            let profile = self.profile.as_deref();
            match isolated("rules", || engine.apply_rules(relative_path, content, profile)) {
                Ok(found) => result.violations.extend(found),
                Err(f) => failures.push(f),
            }
        }

        result.recommendations = recommendations(&result);
        FileAnalysis { result, failures }
    }
}

impl std::fmt::Debug for FileAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAnalyzer")
            .field("stages", &self.enabled_stages())
            .finish()
    }
}

fn isolated<T>(stage: &'static str, f: impl FnOnce() -> T) -> Result<T, StageFailure> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "stage panicked".to_string());
        StageFailure { stage, message }
    })
}

/// Distinct suggestions in violation order, AI advice first.
fn recommendations(result: &AnalysisResult) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if let Some(d) = &result.ai_detection {
        if d.is_likely_ai && !d.recommendation.is_empty() {
            out.push(d.recommendation.clone());
        }
    }
    for suggestion in result.violations.iter().filter_map(|v| v.suggestion.as_ref()) {
        if out.len() >= MAX_RECOMMENDATIONS {
            break;
        }
        if !out.contains(suggestion) {
            out.push(suggestion.clone());
        }
    }
    out
}
