//! Pattern learner end to end: tree on disk to profile, then drift against it.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use manasx_analysis::drift::{DriftDetector, DriftOptions};
use manasx_analysis::learning::{LearnOptions, PatternLearner};
use manasx_core::types::profile::{Confidence, PatternProfile};
use manasx_core::types::{NamingConvention, Severity};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// 54 camelCase files and 6 snake_case files under `src/`.
fn mostly_camel_tree(root: &Path) {
    for i in 0..54 {
        write(root, &format!("src/component{i}.js"), "const userName = 1;\n");
    }
    for i in 0..6 {
        write(root, &format!("src/legacy{i}.js"), "let user_name = 1;\n");
    }
}

#[test]
fn learns_dominant_convention_with_high_confidence() {
    let dir = tempfile::tempdir().unwrap();
    mostly_camel_tree(dir.path());

    let (profile, report) = PatternLearner::new()
        .learn(dir.path(), &LearnOptions::default())
        .unwrap();

    assert_eq!(report.files_analyzed, 60);
    assert_eq!(report.files_skipped, 0);
    assert_eq!(profile.confidence, Confidence::High);
    assert_eq!(
        profile.recommendations.naming.variables,
        Some(NamingConvention::CamelCase)
    );
    assert_eq!(profile.raw_counts.naming.variables.get("camelCase"), 54);
    assert_eq!(profile.raw_counts.naming.variables.get("snake_case"), 6);
    assert_eq!(profile.recommendations.architecture.common_folders, vec!["src"]);
}

#[test]
fn snake_case_variable_drifts_from_camel_profile() {
    let dir = tempfile::tempdir().unwrap();
    mostly_camel_tree(dir.path());
    let (profile, _) = PatternLearner::new()
        .learn(dir.path(), &LearnOptions::default())
        .unwrap();

    let detector = DriftDetector::new(Arc::new(profile), DriftOptions::default());
    let result = detector.analyze_content("src/widget.js", "var my_var = 1;\n");

    assert_eq!(result.violations.len(), 1);
    let v = &result.violations[0];
    assert_eq!(v.kind, "naming");
    assert_eq!(v.severity, Severity::Low);
    assert_eq!(v.line, 1);
    assert!(v.suggestion.as_deref().unwrap().contains("myVar"));
    assert_eq!(result.compliance_score, 98);
    assert!(!result.drifted);
}

#[test]
fn small_corpus_has_low_confidence() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "index.js", "const a = 1;\n");
    let (profile, _) = PatternLearner::new()
        .learn(dir.path(), &LearnOptions::default())
        .unwrap();
    assert_eq!(profile.confidence, Confidence::Low);
}

#[test]
fn max_files_caps_the_corpus() {
    let dir = tempfile::tempdir().unwrap();
    mostly_camel_tree(dir.path());
    let options = LearnOptions {
        max_files: 10,
        ..LearnOptions::default()
    };
    let (profile, report) = PatternLearner::new().learn(dir.path(), &options).unwrap();
    assert_eq!(report.files_analyzed, 10);
    assert!(report.truncated);
    assert_eq!(profile.confidence, Confidence::Medium);
}

#[test]
fn saved_profile_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    mostly_camel_tree(dir.path());
    let (profile, _) = PatternLearner::new()
        .learn(dir.path(), &LearnOptions::default())
        .unwrap();

    let path = dir.path().join("out").join("manasx-patterns.json");
    PatternLearner::save(&profile, &path).unwrap();
    let loaded = PatternProfile::load(&path).unwrap();
    assert_eq!(loaded.recommendations, profile.recommendations);
    assert_eq!(loaded.raw_counts, profile.raw_counts);
}

#[test]
fn non_directory_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "file.js", "");
    assert!(PatternLearner::new()
        .learn(&dir.path().join("file.js"), &LearnOptions::default())
        .is_err());
}
