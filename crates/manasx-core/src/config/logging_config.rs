//! Log sink configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_DIR, DEFAULT_MAX_LOG_SIZE};

/// Configuration for the monitor's on-disk logs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory, relative to the project root. Default: `.manasx/logs`.
    pub log_dir: Option<String>,
    /// Byte size at which a log file is rotated. Default: 10MB.
    pub max_log_size: Option<u64>,
}

impl LoggingConfig {
    pub fn effective_log_dir(&self) -> String {
        self.log_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
    }

    pub fn effective_max_log_size(&self) -> u64 {
        self.max_log_size.unwrap_or(DEFAULT_MAX_LOG_SIZE)
    }
}
