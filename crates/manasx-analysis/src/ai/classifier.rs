use async_trait::async_trait;
use manasx_core::errors::ClassifierError;

/// What the classifier is asked to judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifyMode {
    /// `[{line, message, suggestion}]`
    BestPractice,
    /// `{metrics, issues, suggestions}`
    Performance,
    /// Free text carrying `isLikelyAI`, `confidence` and `reasons`.
    Provenance,
}

impl ClassifyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BestPractice => "best-practice",
            Self::Performance => "performance",
            Self::Provenance => "provenance",
        }
    }
}

/// External model call. Returns the raw response text.
#[async_trait]
pub trait AiClassifier: Send + Sync {
    async fn classify(
        &self,
        text: &str,
        filename: &str,
        mode: ClassifyMode,
    ) -> Result<String, ClassifierError>;
}

/// Classifier used when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClassifier;

#[async_trait]
impl AiClassifier for NullClassifier {
    async fn classify(
        &self,
        _text: &str,
        _filename: &str,
        _mode: ClassifyMode,
    ) -> Result<String, ClassifierError> {
        Err(ClassifierError::Unavailable(
            "no classifier configured".to_string(),
        ))
    }
}
