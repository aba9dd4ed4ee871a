use manasx_core::errors::RuleError;
use manasx_core::types::{NamingConvention, Violation};

use crate::rules::types::{RuleContext, RuleEvaluator};
use crate::tokenizer::{line_col, DeclKind};

/// `naming/camelcase-variable-naming`: active only when the learned profile
/// recommends camelCase variables.
pub struct CamelCaseVariableNaming;

impl RuleEvaluator for CamelCaseVariableNaming {
    fn rule_id(&self) -> &'static str {
        "naming/camelcase-variable-naming"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let recommended = ctx.profile.and_then(|p| p.recommendations.naming.variables);
        if recommended != Some(NamingConvention::CamelCase) {
            return Ok(Vec::new());
        }
        Ok(ctx
            .tokenizer
            .declarations(ctx.content)
            .into_iter()
            .filter(|d| d.kind == DeclKind::Variable)
            .filter(|d| !NamingConvention::CamelCase.accepts(&d.name))
            .map(|d| {
                let (line, column) = line_col(ctx.content, d.offset);
                let fixed = NamingConvention::CamelCase.convert(&d.name);
                ctx.rule
                    .violation(ctx.file, line, format!("Variable '{}' is not camelCase", d.name))
                    .with_column(column)
                    .with_suggestion(format!("Rename to '{fixed}'"))
            })
            .collect())
    }
}
