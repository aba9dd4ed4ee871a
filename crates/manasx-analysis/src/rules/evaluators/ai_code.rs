//! Rules that only run on content the classifier flagged as AI-generated.

use manasx_core::errors::RuleError;
use manasx_core::types::Violation;

use super::{all_hits, rule_pattern};
use crate::rules::types::{RuleContext, RuleEvaluator};

rule_pattern!(
    RE_PLACEHOLDER,
    r"(?i)\b(?:TODO|FIXME|XXX)\b|\byour (?:code|logic|implementation) here\b|\bnot implemented\b|\bplaceholder\b"
);

/// `ai-code/require-review-marker`
pub struct RequireReviewMarker;

impl RuleEvaluator for RequireReviewMarker {
    fn rule_id(&self) -> &'static str {
        "ai-code/require-review-marker"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let marker = ctx.rule.string_param("marker", "@ai-reviewed")?;
        if ctx.content.contains(marker) {
            return Ok(Vec::new());
        }
        Ok(vec![ctx
            .rule
            .violation(
                ctx.file,
                1,
                format!("AI-generated code has no '{marker}' review marker"),
            )
            .with_suggestion(format!("Review the code, then add a // {marker} comment"))])
    }
}

/// `ai-code/no-placeholder-code`
pub struct NoPlaceholderCode;

impl RuleEvaluator for NoPlaceholderCode {
    fn rule_id(&self) -> &'static str {
        "ai-code/no-placeholder-code"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let mut seen_lines = Vec::new();
        let mut violations = Vec::new();
        for hit in all_hits(&RE_PLACEHOLDER, ctx.content) {
            if seen_lines.contains(&hit.line) {
                continue;
            }
            seen_lines.push(hit.line);
            violations.push(
                ctx.rule
                    .violation(ctx.file, hit.line, format!("Placeholder left in code: '{}'", hit.text))
                    .with_column(hit.column)
                    .with_suggestion("Finish the implementation or remove the stub"),
            );
        }
        Ok(violations)
    }
}
