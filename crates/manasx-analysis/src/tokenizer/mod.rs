//! Lexical tokenizer: the seam between raw source text and the learner,
//! drift detector and rule engine.
//!
//! Everything here works on text, not syntax trees. The `LexicalTokenizer`
//! trait lets a syntax-aware implementation replace the regex one without
//! touching its callers.

pub mod patterns;
pub mod position;
pub mod regex_tokenizer;
pub mod types;

pub use manasx_core::types::NamingConvention;
pub use position::{context_lines, line_col};
pub use regex_tokenizer::RegexTokenizer;
pub use types::{CommentStats, DeclKind, Declaration, ImportRef};

use manasx_core::types::profile::ExportStyle;

/// Extracts the lexical facts the analysis passes need from one file.
pub trait LexicalTokenizer: Send + Sync {
    /// Variable, function and constant declarations with their byte offsets.
    fn declarations(&self, content: &str) -> Vec<Declaration>;

    /// Module specifiers of `import` statements, `require()` and dynamic `import()`.
    fn imports(&self, content: &str) -> Vec<ImportRef>;

    /// Named, default or mixed exports. `None` when the file exports nothing.
    fn export_style(&self, content: &str) -> Option<ExportStyle>;

    /// Comment line counts and block styles.
    fn comments(&self, content: &str) -> CommentStats;
}
