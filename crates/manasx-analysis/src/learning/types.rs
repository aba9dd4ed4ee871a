//! Learner options and run report.

use manasx_core::config::LearnConfig;

use crate::scanner::WalkOptions;

/// Inputs of one learning pass.
#[derive(Debug, Clone)]
pub struct LearnOptions {
    pub extensions: Vec<String>,
    /// Directory names skipped in addition to the built-in list.
    pub ignore_patterns: Vec<String>,
    pub max_files: usize,
}

impl Default for LearnOptions {
    fn default() -> Self {
        Self::from_config(&LearnConfig::default())
    }
}

impl LearnOptions {
    pub fn from_config(config: &LearnConfig) -> Self {
        Self {
            extensions: config.effective_extensions(),
            ignore_patterns: config.ignore_patterns.clone(),
            max_files: config.effective_max_files(),
        }
    }

    pub(crate) fn walk_options(&self) -> WalkOptions {
        let config = LearnConfig {
            max_files: Some(self.max_files),
            extensions: self.extensions.clone(),
            ignore_patterns: self.ignore_patterns.clone(),
            profile_path: None,
        };
        WalkOptions::from_learn_config(&config)
    }
}

/// What one learning pass did, for logging and the final summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearnReport {
    pub files_analyzed: usize,
    /// Files found but unreadable.
    pub files_skipped: usize,
    pub dirs_skipped: usize,
    /// The `max_files` cap cut the walk short.
    pub truncated: bool,
    pub duration_ms: u64,
}
