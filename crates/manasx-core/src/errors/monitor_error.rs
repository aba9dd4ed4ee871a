//! Monitor errors. Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, ManasxErrorCode};
use super::{ConfigError, LogError, ScanError};

/// Errors surfaced by the continuous monitor. Only startup failures are
/// fatal; everything else is logged and isolated to a file or stage.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Startup failed: {0}")]
    Startup(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Log error: {0}")]
    Log(#[from] LogError),

    #[error("Monitor is not running")]
    Stopped,

    #[error("Invalid tool call: {0}")]
    InvalidToolCall(String),
}

impl ManasxErrorCode for MonitorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Startup(_) => error_code::STARTUP_ERROR,
            Self::Config(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
            Self::Log(e) => e.error_code(),
            Self::Stopped => error_code::MONITOR_STOPPED,
            Self::InvalidToolCall(_) => error_code::INVALID_TOOL_CALL,
        }
    }
}
