//! Drift detector: per-file deviation from a learned `PatternProfile`.
//!
//! Four independent checks (naming, imports, architecture, comments) feed a
//! single violation list, which is scored against a 100-point budget.

pub mod architecture;
pub mod checks;
pub mod comments;
pub mod detector;
pub mod imports;
pub mod naming;
pub mod scoring;
pub mod suggestions;
pub mod types;

pub use checks::{DriftCheck, FileInput};
pub use detector::DriftDetector;
pub use scoring::{compliance_score, directory_score};
pub use types::{
    BulkSuggestion, DirectoryDriftResult, DriftOptions, DriftResult, DriftSummary,
    FileDriftResult,
};
