//! Rule engine: versioned rule configuration, a registry of evaluators,
//! exceptions and inline suppression.

pub mod config;
pub mod defaults;
pub mod engine;
pub mod evaluators;
pub mod exceptions;
pub mod registry;
pub mod suppression;
pub mod types;

pub use config::{RuleConfig, RuleConfigSummary};
pub use engine::RuleEngine;
pub use exceptions::ExceptionSet;
pub use registry::RuleRegistry;
pub use suppression::SuppressionChecker;
pub use types::{Rule, RuleContext, RuleEvaluator};
