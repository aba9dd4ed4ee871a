//! RuleEngine: applies configured rules to one file's content.

use std::sync::Arc;

use manasx_core::errors::ManasxErrorCode;
use manasx_core::types::profile::PatternProfile;
use manasx_core::types::Violation;

use super::config::{RuleConfig, RuleConfigSummary};
use super::exceptions::ExceptionSet;
use super::registry::RuleRegistry;
use super::suppression::SuppressionChecker;
use super::types::{Rule, RuleContext, RuleEvaluator, AI_CODE_CATEGORY};
use crate::tokenizer::{LexicalTokenizer, RegexTokenizer};

/// Evaluates resolved rules against file content.
///
/// Per rule: exceptions first, then the evaluator, then inline suppression.
/// An evaluator error or panic is logged and contributes no violations;
/// other rules still run.
pub struct RuleEngine {
    config: RuleConfig,
    rules: Vec<Rule>,
    exceptions: ExceptionSet,
    registry: RuleRegistry,
    suppression: SuppressionChecker,
    tokenizer: Arc<dyn LexicalTokenizer>,
}

impl RuleEngine {
    pub fn new(config: RuleConfig) -> Self {
        Self::with_registry(config, RuleRegistry::with_builtins())
    }

    pub fn with_registry(config: RuleConfig, registry: RuleRegistry) -> Self {
        let rules = config.resolved_rules();
        for rule in &rules {
            if !registry.contains(&rule.id) {
                tracing::debug!(rule_id = %rule.id, "configured rule has no evaluator");
            }
        }
        Self {
            exceptions: ExceptionSet::new(config.exceptions.clone()),
            rules,
            config,
            registry,
            suppression: SuppressionChecker::new(),
            tokenizer: Arc::new(RegexTokenizer),
        }
    }

    /// Swap the tokenizer handed to evaluators.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn LexicalTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Register an additional evaluator.
    pub fn register(&mut self, evaluator: Box<dyn RuleEvaluator>) {
        self.registry.register(evaluator);
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn summary(&self) -> RuleConfigSummary {
        self.config.summary()
    }

    /// Enabled rules, `ai-code` included.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Every enabled rule outside the `ai-code` category.
    pub fn apply_rules(
        &self,
        file: &str,
        content: &str,
        profile: Option<&PatternProfile>,
    ) -> Vec<Violation> {
        self.run(file, content, profile, |rule| rule.category != AI_CODE_CATEGORY)
    }

    /// Only the `ai-code` category, for content flagged as AI-generated.
    pub fn apply_ai_rules(&self, file: &str, content: &str) -> Vec<Violation> {
        self.run(file, content, None, |rule| rule.category == AI_CODE_CATEGORY)
    }

    fn run(
        &self,
        file: &str,
        content: &str,
        profile: Option<&PatternProfile>,
        select: impl Fn(&Rule) -> bool,
    ) -> Vec<Violation> {
        let lines: Vec<&str> = content.lines().collect();
        let mut violations = Vec::new();

        for rule in self.rules.iter().filter(|r| select(r)) {
            if self.exceptions.is_excepted(file, &rule.id) {
                tracing::trace!(file, rule_id = %rule.id, "rule excepted");
                continue;
            }
            let ctx = RuleContext {
                content,
                file,
                rule,
                profile,
                tokenizer: self.tokenizer.as_ref(),
            };
            match self.registry.evaluate(&ctx) {
                Ok(Some(found)) => violations.extend(
                    found
                        .into_iter()
                        .filter(|v| !self.suppression.is_suppressed(&lines, v.line, &rule.id)),
                ),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(
                        file,
                        rule_id = %rule.id,
                        error_code = e.error_code(),
                        error = %e,
                        "rule evaluation failed"
                    );
                }
            }
        }

        tracing::debug!(file, violation_count = violations.len(), "rules applied");
        violations
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rules.len())
            .field("exceptions", &self.exceptions.len())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
