//! External classifier errors.

use super::error_code::{self, ManasxErrorCode};

/// Failures of the external AI classifier. Callers treat every variant as
/// "no classification available".
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Classifier returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Classifier timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl ManasxErrorCode for ClassifierError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => error_code::CLASSIFIER_UNAVAILABLE,
            Self::InvalidResponse(_) => error_code::CLASSIFIER_INVALID_RESPONSE,
            Self::Timeout { .. } => error_code::CLASSIFIER_TIMEOUT,
        }
    }
}
