//! Log sink errors.

use std::path::PathBuf;

use super::error_code::{self, ManasxErrorCode};

/// Errors that can occur while writing or rotating a log file.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Cannot create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Write to {path} failed: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Rotation of {path} failed: {source}")]
    Rotate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not serialize log record: {0}")]
    Serialize(String),
}

impl ManasxErrorCode for LogError {
    fn error_code(&self) -> &'static str {
        error_code::LOG_ERROR
    }
}
