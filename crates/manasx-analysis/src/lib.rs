//! # manasx-analysis
//!
//! Analysis engine for the ManasX governance pipeline.
//! Scanner, lexical tokenizer, pattern learner, drift detector,
//! rule engine and the AI-classification boundary.

pub mod ai;
pub mod drift;
pub mod learning;
pub mod rules;
pub mod scanner;
pub mod tokenizer;

pub use ai::{AiClassifier, AiCodeDetector, ClassifyMode, NullClassifier};
pub use drift::{DriftDetector, DriftOptions, DriftResult, FileDriftResult};
pub use learning::{LearnOptions, PatternLearner};
pub use rules::{RuleConfig, RuleEngine};
