//! DriftDetector: runs every `DriftCheck` over a file or a directory.

use std::path::Path;
use std::sync::Arc;

use manasx_core::errors::ScanError;
use manasx_core::types::profile::PatternProfile;
use manasx_core::types::{Severity, Violation};

use super::architecture::ArchitectureCheck;
use super::checks::{DriftCheck, FileInput};
use super::comments::CommentCheck;
use super::imports::ImportCheck;
use super::naming::NamingCheck;
use super::scoring::{compliance_score, directory_score};
use super::suggestions::bulk_suggestions;
use super::types::{DirectoryDriftResult, DriftOptions, DriftResult, DriftSummary, FileDriftResult};
use crate::scanner::{relative_path, walk, WalkOptions};
use crate::tokenizer::{context_lines, LexicalTokenizer, RegexTokenizer};

/// Flags deviations from a learned profile.
pub struct DriftDetector {
    profile: Arc<PatternProfile>,
    options: DriftOptions,
    tokenizer: Arc<dyn LexicalTokenizer>,
    checks: Vec<Box<dyn DriftCheck>>,
    walk_options: WalkOptions,
}

impl DriftDetector {
    pub fn new(profile: Arc<PatternProfile>, options: DriftOptions) -> Self {
        Self {
            profile,
            options,
            tokenizer: Arc::new(RegexTokenizer),
            checks: vec![
                Box::new(NamingCheck),
                Box::new(ImportCheck),
                Box::new(ArchitectureCheck),
                Box::new(CommentCheck),
            ],
            walk_options: WalkOptions::default().unbounded(),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn LexicalTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_walk_options(mut self, walk_options: WalkOptions) -> Self {
        self.walk_options = walk_options;
        self
    }

    pub fn options(&self) -> &DriftOptions {
        &self.options
    }

    pub fn profile(&self) -> &PatternProfile {
        &self.profile
    }

    /// Analyze a file or, for a directory, every watchable file under it.
    pub fn detect_drift(&self, path: &Path) -> Result<DriftResult, ScanError> {
        if path.is_dir() {
            return self.detect_directory(path).map(DriftResult::Directory);
        }
        let bytes = std::fs::read(path).map_err(|e| ScanError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let display = relative_path(Path::new(""), path);
        Ok(DriftResult::File(self.analyze_content(&display, &content)))
    }

    /// Analyze every file under `dir`; paths in the result are relative to it.
    pub fn detect_directory(&self, dir: &Path) -> Result<DirectoryDriftResult, ScanError> {
        let outcome = walk(dir, &self.walk_options)?;
        let mut files = Vec::with_capacity(outcome.files.len());
        for path in &outcome.files {
            let bytes = match std::fs::read(path) {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(file = %path.display(), stage = "drift", error = %e, "skipping unreadable file");
                    continue;
                }
            };
            let rel = relative_path(dir, path);
            files.push(self.analyze_content(&rel, &String::from_utf8_lossy(&bytes)));
        }

        let scores: Vec<u32> = files.iter().map(|f| f.compliance_score).collect();
        let overall_score = directory_score(&scores);
        let summary = DriftSummary::from_violations(files.iter().flat_map(|f| f.violations.iter()));
        let result = DirectoryDriftResult {
            directory: dir.display().to_string(),
            files_analyzed: files.len(),
            drifted_files: files.iter().filter(|f| f.drifted).count(),
            overall_score,
            drifted: overall_score < self.options.threshold,
            summary,
            files,
        };
        tracing::info!(
            directory = %result.directory,
            files_analyzed = result.files_analyzed,
            compliance_score = result.overall_score,
            "directory drift analysis complete"
        );
        Ok(result)
    }

    /// Analyze in-memory content. `relative_path` drives the naming and
    /// architecture checks; nothing is read from disk.
    pub fn analyze_content(&self, relative_path: &str, content: &str) -> FileDriftResult {
        let input = FileInput::tokenize(relative_path, content, self.tokenizer.as_ref());

        let mut violations: Vec<Violation> = Vec::new();
        for check in &self.checks {
            violations.extend(check.check(&input, &self.profile, &self.options));
        }

        if !self.options.include_info {
            violations.retain(|v| v.severity != Severity::Info);
        }
        if self.options.context_size > 0 {
            for v in &mut violations {
                let ctx = context_lines(content, v.line, self.options.context_size);
                if !ctx.is_empty() {
                    v.context = Some(ctx);
                }
            }
        }

        let compliance_score = compliance_score(&violations);
        tracing::debug!(
            file = relative_path,
            violation_count = violations.len(),
            compliance_score,
            "file drift analysis complete"
        );
        FileDriftResult {
            file: relative_path.to_string(),
            compliance_score,
            drifted: compliance_score < self.options.threshold,
            summary: DriftSummary::from_violations(&violations),
            suggestions: bulk_suggestions(&violations),
            violations,
        }
    }
}
