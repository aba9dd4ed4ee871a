use manasx_core::errors::RuleError;
use manasx_core::types::Violation;

use super::{code_hits, rule_pattern};
use crate::rules::types::{RuleContext, RuleEvaluator};

rule_pattern!(RE_EVAL, r"\beval\s*\(");
rule_pattern!(RE_DANGEROUS_HTML, r"\b(?:innerHTML|outerHTML)\b|\bdangerouslySetInnerHTML\b");

/// `security/no-eval`
pub struct NoEval;

impl RuleEvaluator for NoEval {
    fn rule_id(&self) -> &'static str {
        "security/no-eval"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        Ok(code_hits(&RE_EVAL, ctx.content)
            .into_iter()
            .map(|hit| {
                ctx.rule
                    .violation(ctx.file, hit.line, "eval() executes arbitrary code")
                    .with_column(hit.column)
                    .with_suggestion("Parse data with JSON.parse or use an explicit dispatch table")
            })
            .collect())
    }
}

/// `security/no-dangerous-html`
pub struct NoDangerousHtml;

impl RuleEvaluator for NoDangerousHtml {
    fn rule_id(&self) -> &'static str {
        "security/no-dangerous-html"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        Ok(code_hits(&RE_DANGEROUS_HTML, ctx.content)
            .into_iter()
            .map(|hit| {
                ctx.rule
                    .violation(
                        ctx.file,
                        hit.line,
                        format!("{} injects unescaped HTML", hit.text),
                    )
                    .with_column(hit.column)
                    .with_suggestion("Use textContent or a sanitizer")
            })
            .collect())
    }
}
