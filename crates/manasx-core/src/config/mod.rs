//! Configuration system for ManasX.
//! TOML-based, layered resolution: overrides > env > project > defaults.

pub mod detect_config;
pub mod learn_config;
pub mod logging_config;
pub mod manasx_config;
pub mod monitor_config;

pub use detect_config::DetectConfig;
pub use learn_config::LearnConfig;
pub use logging_config::LoggingConfig;
pub use manasx_config::{ConfigOverrides, ManasxConfig};
pub use monitor_config::MonitorConfig;
