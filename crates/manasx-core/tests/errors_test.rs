//! Tests for error codes and their tool-facing rendering.

use std::path::PathBuf;

use manasx_core::errors::*;

#[test]
fn test_every_error_has_a_stable_code() {
    let config = ConfigError::ValidationFailed {
        field: "detect.threshold".into(),
        message: "must be between 0 and 100".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);

    let profile = ProfileError::NotFound {
        path: PathBuf::from("manasx-patterns.json"),
    };
    assert_eq!(profile.error_code(), error_code::PROFILE_ERROR);

    assert_eq!(
        ClassifierError::Timeout { timeout_ms: 5 }.error_code(),
        error_code::CLASSIFIER_TIMEOUT
    );
    assert_eq!(
        ClassifierError::InvalidResponse("no json".into()).error_code(),
        error_code::CLASSIFIER_INVALID_RESPONSE
    );
    assert_eq!(MonitorError::Stopped.error_code(), error_code::MONITOR_STOPPED);
    assert_eq!(
        MonitorError::InvalidToolCall("unknown tool 'x'".into()).error_code(),
        error_code::INVALID_TOOL_CALL
    );
}

#[test]
fn test_monitor_error_delegates_code_to_source() {
    let err: MonitorError = LogError::Serialize("bad".into()).into();
    assert_eq!(err.error_code(), error_code::LOG_ERROR);

    let err: MonitorError = ScanError::NotADirectory {
        path: PathBuf::from("/nope"),
    }
    .into();
    assert_eq!(err.error_code(), error_code::SCAN_ERROR);
}

#[test]
fn test_tool_string_format() {
    let err = RuleError::InvalidParameter {
        rule_id: "api/require-company-fetch".into(),
        parameter: "wrapperName".into(),
        message: "must be a string".into(),
    };
    let s = err.tool_string();
    assert!(s.starts_with("[RULE_ERROR] "));
    assert!(s.contains("wrapperName"));
}
