//! Naming drift: file name and declared identifiers against the learned conventions.

use manasx_core::types::profile::PatternProfile;
use manasx_core::types::{NamingConvention, Severity, Violation};

use super::checks::{DriftCheck, FileInput};
use super::types::DriftOptions;
use crate::learning::observe::{file_base, file_name};
use crate::tokenizer::{line_col, DeclKind};

pub const RULE_ID: &str = "drift/naming";

pub struct NamingCheck;

impl DriftCheck for NamingCheck {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn check(
        &self,
        input: &FileInput<'_>,
        profile: &PatternProfile,
        _options: &DriftOptions,
    ) -> Vec<Violation> {
        let naming = &profile.recommendations.naming;
        let mut violations = Vec::new();

        if let Some(expected) = naming.files {
            let name = file_name(input.relative_path);
            let base = file_base(name);
            if !expected.accepts(base) {
                let renamed = format!("{}{}", expected.convert(base), &name[base.len()..]);
                violations.push(
                    Violation::new(
                        RULE_ID,
                        self.name(),
                        "files",
                        Severity::Low,
                        format!("File name '{name}' does not follow the project's {expected} convention"),
                        input.relative_path,
                        1,
                    )
                    .with_column(1)
                    .with_suggestion(format!("Rename the file to '{renamed}'")),
                );
            }
        }

        for decl in &input.declarations {
            let expected = match decl.kind {
                DeclKind::Variable => naming.variables,
                DeclKind::Function => naming.functions,
                DeclKind::Constant => naming.constants,
            };
            let Some(expected) = expected else {
                continue;
            };
            if expected.accepts(&decl.name) {
                continue;
            }
            let found = NamingConvention::classify(&decl.name);
            let (line, column) = line_col(input.content, decl.offset);
            let noun = match decl.kind {
                DeclKind::Variable => "Variable",
                DeclKind::Function => "Function",
                DeclKind::Constant => "Constant",
            };
            violations.push(
                Violation::new(
                    RULE_ID,
                    self.name(),
                    decl.kind.category(),
                    Severity::Low,
                    format!("{noun} '{}' uses {found}, project convention is {expected}", decl.name),
                    input.relative_path,
                    line,
                )
                .with_column(column)
                .with_suggestion(format!("Rename '{}' to '{}'", decl.name, expected.convert(&decl.name))),
            );
        }

        violations
    }
}
