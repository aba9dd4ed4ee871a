//! Pattern learner configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS, DEFAULT_MAX_FILES, DEFAULT_PROFILE_FILE};

/// Configuration for a learning pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LearnConfig {
    /// Maximum number of files analyzed. Default: 1000.
    pub max_files: Option<usize>,
    /// Extension allow-list without the leading dot. Empty means the defaults.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Extra directory names to skip, added to the built-in ignore list.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Where the learned profile is written, relative to the root.
    pub profile_path: Option<String>,
}

impl LearnConfig {
    /// Returns the effective maximum file count, defaulting to 1000.
    pub fn effective_max_files(&self) -> usize {
        self.max_files.unwrap_or(DEFAULT_MAX_FILES)
    }

    /// Returns the extension allow-list, falling back to the JS/TS family.
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        }
    }

    /// Built-in ignored directory names plus the configured extras.
    pub fn effective_ignored_dirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect();
        for extra in &self.ignore_patterns {
            if !dirs.contains(extra) {
                dirs.push(extra.clone());
            }
        }
        dirs
    }

    pub fn effective_profile_path(&self) -> String {
        self.profile_path
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE_FILE.to_string())
    }
}
