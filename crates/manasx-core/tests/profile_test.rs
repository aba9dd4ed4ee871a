//! Tests for pattern profile persistence.

use chrono::Utc;
use manasx_core::errors::ProfileError;
use manasx_core::types::profile::{Confidence, PatternProfile, RawCounts, Recommendations};
use manasx_core::types::NamingConvention;

fn sample_profile() -> PatternProfile {
    let mut raw = RawCounts {
        files_analyzed: 12,
        ..Default::default()
    };
    raw.naming.variables.add_n("camelCase", 30);
    raw.naming.variables.add_n("snake_case", 2);
    raw.folders.add_n("components", 5);

    let mut recommendations = Recommendations::default();
    recommendations.naming.variables = Some(NamingConvention::CamelCase);
    recommendations.architecture.common_folders = vec!["components".into()];

    PatternProfile {
        timestamp: Utc::now(),
        confidence: Confidence::Medium,
        recommendations,
        raw_counts: raw,
    }
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("manasx-patterns.json");
    let profile = sample_profile();
    profile.save(&path).unwrap();

    let loaded = PatternProfile::load(&path).unwrap();
    assert_eq!(loaded, profile);
    assert_eq!(loaded.raw_counts.naming.variables.mode(), Some("camelCase"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"rawCounts\""));
    assert!(text.contains("\"camelCase\""));
}

#[test]
fn test_load_errors_are_typed() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        PatternProfile::load(&missing),
        Err(ProfileError::NotFound { .. })
    ));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        PatternProfile::load(&broken),
        Err(ProfileError::InvalidJson { .. })
    ));
}

#[test]
fn test_summary_trims_recommendations() {
    let summary = sample_profile().summary();
    assert_eq!(summary.files_analyzed, 12);
    assert_eq!(summary.confidence, Confidence::Medium);
    assert_eq!(summary.naming.variables, Some(NamingConvention::CamelCase));
    assert_eq!(summary.common_folders, vec!["components".to_string()]);
}
