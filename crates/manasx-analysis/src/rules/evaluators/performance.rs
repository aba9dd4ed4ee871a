use manasx_core::errors::RuleError;
use manasx_core::types::Violation;

use super::{code_hits, rule_pattern};
use crate::rules::types::{RuleContext, RuleEvaluator};

rule_pattern!(
    RE_SYNC_FS,
    r"\b(readFileSync|writeFileSync|appendFileSync|readdirSync|statSync|lstatSync|existsSync|mkdirSync|rmSync|rmdirSync|unlinkSync|copyFileSync|renameSync|accessSync|openSync)\s*\("
);

/// `performance/no-sync-fs`
pub struct NoSyncFs;

impl RuleEvaluator for NoSyncFs {
    fn rule_id(&self) -> &'static str {
        "performance/no-sync-fs"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        Ok(code_hits(&RE_SYNC_FS, ctx.content)
            .into_iter()
            .map(|hit| {
                let call = hit.text.trim_end_matches(['(', ' ', '\t']);
                let async_name = call.trim_end_matches("Sync");
                ctx.rule
                    .violation(ctx.file, hit.line, format!("{call}() blocks the event loop"))
                    .with_column(hit.column)
                    .with_suggestion(format!("Use fs.promises.{async_name}()"))
            })
            .collect())
    }
}
