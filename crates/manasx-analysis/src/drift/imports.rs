//! Import drift: relative/absolute style, explicit/implicit extensions,
//! blocked modules.

use manasx_core::types::profile::{ExtensionStyle, ImportStyle, PatternProfile};
use manasx_core::types::{Severity, Violation};

use super::checks::{DriftCheck, FileInput};
use super::types::DriftOptions;
use crate::tokenizer::{line_col, ImportRef};

pub const RULE_ID: &str = "drift/imports";

/// Extensions whose presence in a specifier counts as an explicit code import.
const CODE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Non-relative prefixes that point into the project rather than a package.
const PROJECT_ALIAS_PREFIXES: &[&str] = &["/", "src/", "@/", "~/"];

pub struct ImportCheck;

impl ImportCheck {
    fn violation(
        &self,
        input: &FileInput<'_>,
        import: &ImportRef,
        category: &str,
        severity: Severity,
        message: String,
        suggestion: String,
    ) -> Violation {
        let (line, column) = line_col(input.content, import.offset);
        Violation::new(
            RULE_ID,
            self.name(),
            category,
            severity,
            message,
            input.relative_path,
            line,
        )
        .with_column(column)
        .with_suggestion(suggestion)
    }
}

impl DriftCheck for ImportCheck {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn check(
        &self,
        input: &FileInput<'_>,
        profile: &PatternProfile,
        options: &DriftOptions,
    ) -> Vec<Violation> {
        let recs = &profile.recommendations.imports;
        let mut violations = Vec::new();

        for import in &input.imports {
            let module = import.package_name().unwrap_or_else(|| import.source.clone());
            if options.blocked_modules.iter().any(|b| *b == module || *b == import.source) {
                violations.push(self.violation(
                    input,
                    import,
                    "blocked-module",
                    Severity::High,
                    format!("Import of blocked module '{}'", import.source),
                    format!("Remove the dependency on '{module}' or use an approved alternative"),
                ));
                continue;
            }

            match recs.style {
                Some(ImportStyle::Relative)
                    if PROJECT_ALIAS_PREFIXES.iter().any(|p| import.source.starts_with(p)) =>
                {
                    violations.push(self.violation(
                        input,
                        import,
                        "style",
                        Severity::Low,
                        format!("Absolute import '{}' in a project that uses relative imports", import.source),
                        "Use a relative path (./ or ../)".to_string(),
                    ));
                }
                Some(ImportStyle::Absolute) if import.source.starts_with("../") => {
                    violations.push(self.violation(
                        input,
                        import,
                        "style",
                        Severity::Low,
                        format!("Parent-relative import '{}' in a project that uses absolute imports", import.source),
                        "Use the project's absolute import path".to_string(),
                    ));
                }
                _ => {}
            }

            if !import.is_relative() {
                continue;
            }
            match recs.extensions {
                Some(ExtensionStyle::Explicit) if !import.has_extension() => {
                    violations.push(self.violation(
                        input,
                        import,
                        "extensions",
                        Severity::Low,
                        format!("Import '{}' omits the file extension", import.source),
                        "Add the file extension, as the rest of the project does".to_string(),
                    ));
                }
                Some(ExtensionStyle::Implicit) if has_code_extension(&import.source) => {
                    violations.push(self.violation(
                        input,
                        import,
                        "extensions",
                        Severity::Low,
                        format!("Import '{}' spells out the file extension", import.source),
                        "Drop the file extension, as the rest of the project does".to_string(),
                    ));
                }
                _ => {}
            }
        }

        violations
    }
}

fn has_code_extension(source: &str) -> bool {
    source
        .rsplit_once('.')
        .map(|(_, ext)| CODE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}
