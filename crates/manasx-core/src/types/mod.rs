//! Shared data model for ManasX.
//! Severity and violations, learned pattern profiles, per-file analysis results.

pub mod analysis;
pub mod collections;
pub mod naming;
pub mod profile;
pub mod severity;
pub mod tally;
pub mod violation;

pub use analysis::{AiDetection, AnalysisResult, MonitorStats};
pub use collections::{FxHashMap, FxHashSet};
pub use naming::NamingConvention;
pub use profile::{Confidence, PatternProfile, RawCounts, Recommendations};
pub use severity::Severity;
pub use tally::Tally;
pub use violation::Violation;
