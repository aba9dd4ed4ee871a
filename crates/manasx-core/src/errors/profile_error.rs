//! Pattern profile persistence errors.

use std::path::PathBuf;

use super::error_code::{self, ManasxErrorCode};

/// Errors that can occur while reading or writing a pattern profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error on profile {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid profile JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },
}

impl ManasxErrorCode for ProfileError {
    fn error_code(&self) -> &'static str {
        error_code::PROFILE_ERROR
    }
}
