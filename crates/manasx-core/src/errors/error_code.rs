//! ManasxErrorCode trait for the query surface.

/// Every error enum implements this to provide a stable error code string
/// for external tool integrations.
pub trait ManasxErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn tool_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PROFILE_ERROR: &str = "PROFILE_ERROR";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const CLASSIFIER_UNAVAILABLE: &str = "CLASSIFIER_UNAVAILABLE";
pub const CLASSIFIER_INVALID_RESPONSE: &str = "CLASSIFIER_INVALID_RESPONSE";
pub const CLASSIFIER_TIMEOUT: &str = "CLASSIFIER_TIMEOUT";
pub const LOG_ERROR: &str = "LOG_ERROR";
pub const STARTUP_ERROR: &str = "STARTUP_ERROR";
pub const MONITOR_STOPPED: &str = "MONITOR_STOPPED";
pub const INVALID_TOOL_CALL: &str = "INVALID_TOOL_CALL";
pub const STAGE_FAILED: &str = "STAGE_FAILED";
