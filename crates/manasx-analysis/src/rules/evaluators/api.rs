use manasx_core::constants::DEFAULT_FETCH_WRAPPER;
use manasx_core::errors::RuleError;
use manasx_core::types::Violation;

use super::{code_hits, rule_pattern};
use crate::rules::types::{RuleContext, RuleEvaluator};

rule_pattern!(RE_FETCH, r"\bfetch\s*\(");

/// `api/require-company-fetch`: raw `fetch()` outside the wrapper's own file.
pub struct RequireCompanyFetch;

impl RuleEvaluator for RequireCompanyFetch {
    fn rule_id(&self) -> &'static str {
        "api/require-company-fetch"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let wrapper = ctx.rule.string_param("wrapperName", DEFAULT_FETCH_WRAPPER)?;
        if defines_wrapper(ctx.content, wrapper) {
            return Ok(Vec::new());
        }
        Ok(code_hits(&RE_FETCH, ctx.content)
            .into_iter()
            .map(|hit| {
                ctx.rule
                    .violation(ctx.file, hit.line, format!("Direct fetch() call, use {wrapper}()"))
                    .with_column(hit.column)
                    .with_suggestion(format!("Replace fetch( with {wrapper}("))
            })
            .collect())
    }
}

fn defines_wrapper(content: &str, wrapper: &str) -> bool {
    ["function ", "const ", "let ", "var "]
        .iter()
        .any(|kw| content.contains(&format!("{kw}{wrapper}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_definition_is_detected() {
        assert!(defines_wrapper("export async function companyFetch(url) {}", "companyFetch"));
        assert!(!defines_wrapper("companyFetch('/x')", "companyFetch"));
    }
}
