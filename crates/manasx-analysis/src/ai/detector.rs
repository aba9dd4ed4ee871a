//! AiCodeDetector: timeout and error folding around an `AiClassifier`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use manasx_core::constants::DEFAULT_CLASSIFIER_TIMEOUT_MS;
use manasx_core::errors::{ClassifierError, ManasxErrorCode};
use manasx_core::types::AiDetection;

use super::classifier::{AiClassifier, ClassifyMode, NullClassifier};
use super::parse::{self, BestPracticeFinding, PerformanceReport};

/// Runs classifier calls under a timeout. Every failure becomes "no
/// classification": `None` for provenance, empty results otherwise.
#[derive(Clone)]
pub struct AiCodeDetector {
    classifier: Arc<dyn AiClassifier>,
    timeout: Duration,
}

impl AiCodeDetector {
    pub fn new(classifier: Arc<dyn AiClassifier>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
        }
    }

    /// Detector backed by `NullClassifier`.
    pub fn disabled() -> Self {
        Self::new(
            Arc::new(NullClassifier),
            Duration::from_millis(DEFAULT_CLASSIFIER_TIMEOUT_MS),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// AI-provenance verdict, or `None` when no classification is available.
    pub async fn detect(&self, content: &str, filename: &str) -> Option<AiDetection> {
        let raw = self
            .call(content, filename, ClassifyMode::Provenance)
            .await?;
        Some(parse::parse_provenance(&raw))
    }

    pub async fn best_practices(&self, content: &str, filename: &str) -> Vec<BestPracticeFinding> {
        match self.call(content, filename, ClassifyMode::BestPractice).await {
            Some(raw) => parse::parse_best_practice(&raw),
            None => Vec::new(),
        }
    }

    pub async fn performance(&self, content: &str, filename: &str) -> PerformanceReport {
        match self.call(content, filename, ClassifyMode::Performance).await {
            Some(raw) => parse::parse_performance(&raw),
            None => PerformanceReport::default(),
        }
    }

    /// Raw classifier call. `Err` only for the typed failure, so callers
    /// that need to count it can.
    pub async fn classify_raw(
        &self,
        content: &str,
        filename: &str,
        mode: ClassifyMode,
    ) -> Result<String, ClassifierError> {
        let start = Instant::now();
        let outcome = tokio::time::timeout(
            self.timeout,
            self.classifier.classify(content, filename, mode),
        )
        .await
        .unwrap_or(Err(ClassifierError::Timeout {
            timeout_ms: self.timeout.as_millis() as u64,
        }));
        tracing::debug!(
            file = filename,
            mode = mode.as_str(),
            classifier_time = start.elapsed().as_millis() as u64,
            ok = outcome.is_ok(),
            "classifier call finished"
        );
        outcome
    }

    async fn call(&self, content: &str, filename: &str, mode: ClassifyMode) -> Option<String> {
        match self.classify_raw(content, filename, mode).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!(
                    file = filename,
                    mode = mode.as_str(),
                    error_code = e.error_code(),
                    error = %e,
                    "no classification available"
                );
                None
            }
        }
    }
}

impl Default for AiCodeDetector {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for AiCodeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiCodeDetector")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
