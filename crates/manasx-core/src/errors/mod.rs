//! Error handling for ManasX.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod classifier_error;
pub mod config_error;
pub mod error_code;
pub mod log_error;
pub mod monitor_error;
pub mod profile_error;
pub mod rule_error;
pub mod scan_error;

pub use classifier_error::ClassifierError;
pub use config_error::ConfigError;
pub use error_code::ManasxErrorCode;
pub use log_error::LogError;
pub use monitor_error::MonitorError;
pub use profile_error::ProfileError;
pub use rule_error::RuleError;
pub use scan_error::ScanError;
