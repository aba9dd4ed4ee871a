//! Drift detector against hand-built profiles.

use std::fs;
use std::sync::Arc;

use chrono::Utc;
use manasx_analysis::drift::{DriftDetector, DriftOptions, DriftResult};
use manasx_analysis::learning::consolidate;
use manasx_core::types::profile::{CommentDensity, PatternProfile, RawCounts};
use manasx_core::types::{NamingConvention, Severity};

fn camel_profile() -> PatternProfile {
    let mut profile = consolidate(RawCounts::default(), Utc::now());
    profile.recommendations.naming.variables = Some(NamingConvention::CamelCase);
    profile
}

fn detector(profile: PatternProfile, options: DriftOptions) -> DriftDetector {
    DriftDetector::new(Arc::new(profile), options)
}

// ─── Single file ────────────────────────────────────────────────────────

#[test]
fn empty_file_is_fully_compliant() {
    let d = detector(camel_profile(), DriftOptions::default());
    let result = d.analyze_content("src/empty.js", "");
    assert!(result.violations.is_empty());
    assert_eq!(result.compliance_score, 100);
    assert!(!result.drifted);
    assert_eq!(result.summary.total, 0);
}

#[test]
fn blocked_module_is_high_severity() {
    let d = detector(camel_profile(), DriftOptions::default());
    let result = d.analyze_content("src/run.js", "const cp = require('child_process');\n");
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].severity, Severity::High);
    assert_eq!(result.violations[0].category, "blocked-module");
    assert_eq!(result.compliance_score, 90);
}

#[test]
fn info_violations_only_count_when_included() {
    let mut profile = camel_profile();
    profile.recommendations.architecture.common_folders = vec!["components".to_string()];

    let quiet = detector(profile.clone(), DriftOptions::default());
    let result = quiet.analyze_content("lib/x.js", "const a = 1;\n");
    assert!(result.violations.is_empty());
    assert_eq!(result.compliance_score, 100);

    let verbose = detector(
        profile,
        DriftOptions {
            include_info: true,
            ..DriftOptions::default()
        },
    );
    let result = verbose.analyze_content("lib/x.js", "const a = 1;\n");
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].severity, Severity::Info);
    assert_eq!(result.compliance_score, 99);
}

#[test]
fn missing_comments_in_documented_project() {
    let mut profile = camel_profile();
    profile.recommendations.comments.density = Some(CommentDensity::High);
    let d = detector(profile, DriftOptions::default());

    let src = "const a = 1;\nconst b = 2;\nconst c = 3;\nconst d = 4;\nconst e = 5;\nconst f = 6;\n";
    let result = d.analyze_content("src/consts.js", src);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, "comments");
    assert_eq!(result.violations[0].severity, Severity::Medium);

    // Short files are not judged on density.
    let result = d.analyze_content("src/short.js", "const a = 1;\n");
    assert!(result.violations.is_empty());
}

#[test]
fn violations_carry_context_and_bulk_suggestions() {
    let d = detector(camel_profile(), DriftOptions::default());
    let src = "let first_one = 1;\nlet okName = 2;\nlet second_one = 3;\n";
    let result = d.analyze_content("src/a.js", src);

    assert_eq!(result.violations.len(), 2);
    let ctx = result.violations[0].context.as_deref().unwrap();
    assert!(ctx.starts_with("> 1 | let first_one = 1;"));
    assert_eq!(result.suggestions.len(), 1);
    assert_eq!(result.suggestions[0].lines, vec![1, 3]);
    assert_eq!(result.summary.by_severity.get("low"), Some(&2));
}

#[test]
fn threshold_decides_drifted() {
    let d = detector(
        camel_profile(),
        DriftOptions {
            threshold: 99,
            ..DriftOptions::default()
        },
    );
    let result = d.analyze_content("src/a.js", "let bad_name = 1;\n");
    assert_eq!(result.compliance_score, 98);
    assert!(result.drifted);
}

// ─── Directories ────────────────────────────────────────────────────────

#[test]
fn directory_score_is_mean_of_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "const okName = 1;\n").unwrap();
    fs::write(
        dir.path().join("b.js"),
        "let a_b = 1;\nlet c_d = 2;\nlet e_f = 3;\nlet g_h = 4;\nlet i_j = 5;\n",
    )
    .unwrap();

    let d = detector(camel_profile(), DriftOptions::default());
    let result = d.detect_drift(dir.path()).unwrap();
    let DriftResult::Directory(dir_result) = result else {
        panic!("expected a directory result");
    };
    assert_eq!(dir_result.files_analyzed, 2);
    assert_eq!(dir_result.files[0].file, "a.js");
    assert_eq!(dir_result.files[0].compliance_score, 100);
    assert_eq!(dir_result.files[1].compliance_score, 90);
    assert_eq!(dir_result.overall_score, 95);
    assert_eq!(dir_result.drifted_files, 0);
}

#[test]
fn empty_directory_scores_100() {
    let dir = tempfile::tempdir().unwrap();
    let d = detector(camel_profile(), DriftOptions::default());
    let result = d.detect_directory(dir.path()).unwrap();
    assert_eq!(result.files_analyzed, 0);
    assert_eq!(result.overall_score, 100);
    assert!(!result.drifted);
}

#[test]
fn single_file_path_yields_file_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.js");
    fs::write(&path, "let bad_name = 1;\n").unwrap();
    let d = detector(camel_profile(), DriftOptions::default());
    match d.detect_drift(&path).unwrap() {
        DriftResult::File(f) => assert_eq!(f.compliance_score, 98),
        DriftResult::Directory(_) => panic!("expected a file result"),
    }
}
