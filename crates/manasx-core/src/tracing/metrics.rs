//! Names of the per-file fields recorded on the monitor's `analyze_file`
//! span once an analysis finishes.

/// Milliseconds spent analyzing one file.
pub const ANALYSIS_TIME: &str = "analysis_time";

/// Drift compliance score, recorded only when drift detection ran.
pub const COMPLIANCE_SCORE: &str = "compliance_score";

/// Violations in the finished result.
pub const VIOLATION_COUNT: &str = "violation_count";

/// All recorded fields, in the order the span declares them.
pub const ANALYSIS_FIELDS: [&str; 3] = [ANALYSIS_TIME, COMPLIANCE_SCORE, VIOLATION_COUNT];
