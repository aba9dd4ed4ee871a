//! AI classification boundary.
//!
//! The classifier itself is an external collaborator behind `AiClassifier`.
//! Everything it returns goes through the parsers here, which never fail:
//! malformed text degrades to an empty or neutral result.

pub mod classifier;
pub mod detector;
pub mod parse;

pub use classifier::{AiClassifier, ClassifyMode, NullClassifier};
pub use detector::AiCodeDetector;
pub use parse::{BestPracticeFinding, PerformanceReport};
