//! The `DriftCheck` trait and the tokenized file every check reads.

use manasx_core::types::profile::PatternProfile;
use manasx_core::types::Violation;

use super::types::DriftOptions;
use crate::tokenizer::{CommentStats, Declaration, ImportRef, LexicalTokenizer};

/// One file, tokenized once and shared by all checks.
#[derive(Debug, Clone)]
pub struct FileInput<'a> {
    /// Path relative to the project root, forward slashes.
    pub relative_path: &'a str,
    pub content: &'a str,
    pub declarations: Vec<Declaration>,
    pub imports: Vec<ImportRef>,
    pub comments: CommentStats,
}

impl<'a> FileInput<'a> {
    pub fn tokenize(
        relative_path: &'a str,
        content: &'a str,
        tokenizer: &dyn LexicalTokenizer,
    ) -> Self {
        Self {
            relative_path,
            content,
            declarations: tokenizer.declarations(content),
            imports: tokenizer.imports(content),
            comments: tokenizer.comments(content),
        }
    }
}

/// One axis of drift. Checks are independent and see the same input.
pub trait DriftCheck: Send + Sync {
    /// Axis name, also the `type` of every violation it emits.
    fn name(&self) -> &'static str;

    fn check(
        &self,
        input: &FileInput<'_>,
        profile: &PatternProfile,
        options: &DriftOptions,
    ) -> Vec<Violation>;
}
