//! Evaluator registry keyed by rule id.

use manasx_core::errors::RuleError;
use manasx_core::types::Violation;
use rustc_hash::FxHashMap;

use super::evaluators;
use super::types::{RuleContext, RuleEvaluator};

/// Maps `category/ruleId` to its evaluator. Configured rules without an
/// evaluator are skipped with a debug log.
pub struct RuleRegistry {
    evaluators: FxHashMap<&'static str, Box<dyn RuleEvaluator>>,
}

impl RuleRegistry {
    pub fn empty() -> Self {
        Self {
            evaluators: FxHashMap::default(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for evaluator in evaluators::builtins() {
            registry.register(evaluator);
        }
        registry
    }

    /// Register an evaluator, replacing any with the same id.
    pub fn register(&mut self, evaluator: Box<dyn RuleEvaluator>) {
        self.evaluators.insert(evaluator.rule_id(), evaluator);
    }

    pub fn contains(&self, rule_id: &str) -> bool {
        self.evaluators.contains_key(rule_id)
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    /// Run the evaluator for `ctx.rule`. `Ok(None)` when none is registered.
    /// A panicking evaluator is reported as `EvaluatorPanic`.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<Vec<Violation>>, RuleError> {
        let Some(evaluator) = self.evaluators.get(ctx.rule.id.as_str()) else {
            return Ok(None);
        };
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| evaluator.evaluate(ctx))) {
            Ok(result) => result.map(Some),
            Err(payload) => Err(RuleError::EvaluatorPanic {
                rule_id: ctx.rule.id.clone(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&&str> = self.evaluators.keys().collect();
        ids.sort();
        f.debug_struct("RuleRegistry").field("evaluators", &ids).finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
