//! PatternLearner: walk, observe in parallel, merge in walk order, consolidate.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use manasx_core::errors::{ProfileError, ScanError};
use manasx_core::types::profile::{PatternProfile, RawCounts};
use rayon::prelude::*;

use super::consolidate::consolidate;
use super::observe::observe_file;
use super::types::{LearnOptions, LearnReport};
use crate::scanner::{relative_path, walk};
use crate::tokenizer::{LexicalTokenizer, RegexTokenizer};

/// Learns a `PatternProfile` from a source tree.
pub struct PatternLearner {
    tokenizer: Arc<dyn LexicalTokenizer>,
}

impl Default for PatternLearner {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternLearner {
    pub fn new() -> Self {
        Self::with_tokenizer(Arc::new(RegexTokenizer))
    }

    pub fn with_tokenizer(tokenizer: Arc<dyn LexicalTokenizer>) -> Self {
        Self { tokenizer }
    }

    /// Run one learning pass over `directory`.
    ///
    /// Unreadable files and unlistable subdirectories are skipped with a
    /// warning. Only a root that is not a readable directory is an error.
    pub fn learn(
        &self,
        directory: &Path,
        options: &LearnOptions,
    ) -> Result<(PatternProfile, LearnReport), ScanError> {
        let start = Instant::now();
        let outcome = walk(directory, &options.walk_options())?;

        // par_iter + collect keeps walk order, so merged tallies stay deterministic.
        let observations: Vec<Option<RawCounts>> = outcome
            .files
            .par_iter()
            .map(|path| {
                let bytes = match std::fs::read(path) {
                    Ok(b) => b,
                    Err(e) => {
                        tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
                        return None;
                    }
                };
                let content = String::from_utf8_lossy(&bytes);
                let rel = relative_path(directory, path);
                Some(observe_file(&rel, &content, self.tokenizer.as_ref()))
            })
            .collect();

        let mut raw = RawCounts::default();
        let mut files_skipped = 0;
        for observation in observations {
            match observation {
                Some(counts) => raw.merge(&counts),
                None => files_skipped += 1,
            }
        }

        let report = LearnReport {
            files_analyzed: raw.files_analyzed,
            files_skipped,
            dirs_skipped: outcome.skipped_dirs.len(),
            truncated: outcome.truncated,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        let profile = consolidate(raw, Utc::now());

        tracing::info!(
            root = %directory.display(),
            files_analyzed = report.files_analyzed,
            files_skipped = report.files_skipped,
            dirs_skipped = report.dirs_skipped,
            truncated = report.truncated,
            confidence = %profile.confidence,
            "pattern learning complete"
        );
        Ok((profile, report))
    }

    /// Persist a profile as JSON.
    pub fn save(profile: &PatternProfile, path: &Path) -> Result<(), ProfileError> {
        profile.save(path)?;
        tracing::info!(path = %path.display(), "pattern profile saved");
        Ok(())
    }
}
