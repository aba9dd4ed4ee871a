//! Comment drift: density and dominant style.
//!
//! Missing comments in a well-commented project weigh more than excess
//! comments in a sparse one.

use manasx_core::types::profile::{CommentDensity, CommentStyle, PatternProfile};
use manasx_core::types::{Severity, Violation};

use super::checks::{DriftCheck, FileInput};
use super::types::DriftOptions;
use crate::learning::observe::MIN_LINES_FOR_DENSITY;

pub const RULE_ID: &str = "drift/comments";

pub struct CommentCheck;

impl DriftCheck for CommentCheck {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn check(
        &self,
        input: &FileInput<'_>,
        profile: &PatternProfile,
        _options: &DriftOptions,
    ) -> Vec<Violation> {
        let recs = &profile.recommendations.comments;
        let stats = &input.comments;
        let mut violations = Vec::new();

        if let Some(expected) = recs.density {
            if stats.non_empty_lines >= MIN_LINES_FOR_DENSITY {
                let actual = stats.density_bucket();
                let severity = match (expected, actual) {
                    (CommentDensity::High, CommentDensity::None | CommentDensity::Low) => {
                        Some(Severity::Medium)
                    }
                    (CommentDensity::Medium, CommentDensity::None) => Some(Severity::Low),
                    (CommentDensity::None | CommentDensity::Low, CommentDensity::High) => {
                        Some(Severity::Info)
                    }
                    _ => None,
                };
                if let Some(severity) = severity {
                    let suggestion = if actual < expected {
                        "Document the public functions and non-obvious logic"
                    } else {
                        "Trim comments that restate the code"
                    };
                    violations.push(
                        Violation::new(
                            RULE_ID,
                            self.name(),
                            "density",
                            severity,
                            format!(
                                "Comment density is {actual} ({:.0}%), project norm is {expected}",
                                stats.density() * 100.0
                            ),
                            input.relative_path,
                            1,
                        )
                        .with_suggestion(suggestion),
                    );
                }
            }
        }

        if let (Some(expected), Some(actual)) = (recs.style, stats.dominant_style()) {
            if expected != actual {
                let line = first_comment_line(input.content, actual).unwrap_or(1);
                violations.push(
                    Violation::new(
                        RULE_ID,
                        self.name(),
                        "style",
                        Severity::Low,
                        format!("Mostly {actual} comments, project prefers {expected}"),
                        input.relative_path,
                        line,
                    )
                    .with_suggestion(format!("Prefer {expected} comments")),
                );
            }
        }

        violations
    }
}

/// 1-based line of the first comment written in `style`.
fn first_comment_line(content: &str, style: CommentStyle) -> Option<usize> {
    content.lines().enumerate().find_map(|(idx, line)| {
        let t = line.trim_start();
        let matches = match style {
            CommentStyle::SingleLine => t.starts_with("//"),
            CommentStyle::Doc => t.starts_with("/**") && !t.starts_with("/**/"),
            CommentStyle::MultiLine => t.starts_with("/*") && !(t.starts_with("/**") && !t.starts_with("/**/")),
        };
        matches.then_some(idx + 1)
    })
}
