//! Architecture drift: files outside the learned common folders. Informational only.

use manasx_core::types::profile::PatternProfile;
use manasx_core::types::{Severity, Violation};

use super::checks::{DriftCheck, FileInput};
use super::types::DriftOptions;
use crate::learning::observe::parent_folder;

pub const RULE_ID: &str = "drift/architecture";

pub struct ArchitectureCheck;

impl DriftCheck for ArchitectureCheck {
    fn name(&self) -> &'static str {
        "architecture"
    }

    fn check(
        &self,
        input: &FileInput<'_>,
        profile: &PatternProfile,
        _options: &DriftOptions,
    ) -> Vec<Violation> {
        let common = &profile.recommendations.architecture.common_folders;
        if common.is_empty() {
            return Vec::new();
        }
        let Some(folder) = parent_folder(input.relative_path) else {
            return Vec::new();
        };
        if common.iter().any(|c| c == folder) {
            return Vec::new();
        }
        let examples = common.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
        vec![Violation::new(
            RULE_ID,
            self.name(),
            "folder",
            Severity::Info,
            format!("Folder '{folder}' is not one of the project's common folders"),
            input.relative_path,
            1,
        )
        .with_suggestion(format!("Consider placing this file under one of: {examples}"))]
    }
}
