use manasx_core::errors::RuleError;
use manasx_core::types::Violation;

use crate::rules::types::{RuleContext, RuleEvaluator};

/// `architecture/feature-folder-structure`: a file must sit at least
/// `minDepth` directories below the project root.
pub struct FeatureFolderStructure;

impl RuleEvaluator for FeatureFolderStructure {
    fn rule_id(&self) -> &'static str {
        "architecture/feature-folder-structure"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let min_depth = ctx.rule.usize_param("minDepth", 2)?;
        let depth = ctx
            .file
            .trim_start_matches("./")
            .split('/')
            .filter(|s| !s.is_empty())
            .count()
            .saturating_sub(1);
        if depth >= min_depth {
            return Ok(Vec::new());
        }
        Ok(vec![ctx
            .rule
            .violation(
                ctx.file,
                1,
                format!("File is {depth} folder(s) deep, expected at least {min_depth}"),
            )
            .with_suggestion("Move the file into a feature folder, e.g. src/<feature>/")])
    }
}
