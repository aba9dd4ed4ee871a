//! Scanner data types: WalkOptions, WalkOutcome.

use std::path::PathBuf;

use manasx_core::config::LearnConfig;
use manasx_core::constants::{DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS, DEFAULT_MAX_FILES};

/// What a walk includes.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Extension allow-list without the leading dot. Empty accepts every file.
    pub extensions: Vec<String>,
    /// Directory names skipped wherever they appear. Matched exactly.
    pub ignored_dirs: Vec<String>,
    /// Stop after this many files. `None` is unbounded.
    pub max_files: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            max_files: Some(DEFAULT_MAX_FILES),
        }
    }
}

impl WalkOptions {
    pub fn from_learn_config(config: &LearnConfig) -> Self {
        Self {
            extensions: config.effective_extensions(),
            ignored_dirs: config.effective_ignored_dirs(),
            max_files: Some(config.effective_max_files()),
        }
    }

    /// Same filters with no file cap, as the monitor needs.
    pub fn unbounded(mut self) -> Self {
        self.max_files = None;
        self
    }
}

/// The result of one walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Discovered files, absolute, in walk order.
    pub files: Vec<PathBuf>,
    /// Subdirectories that could not be listed.
    pub skipped_dirs: Vec<PathBuf>,
    pub errors: Vec<String>,
    /// True when `max_files` stopped the walk early.
    pub truncated: bool,
}
