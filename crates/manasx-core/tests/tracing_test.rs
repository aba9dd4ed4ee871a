//! Tests for tracing setup.

use manasx_core::tracing::setup::DEFAULT_DIRECTIVES;
use manasx_core::tracing::{build_filter, init_tracing, metrics};

#[test]
fn init_reports_the_same_outcome_every_time() {
    let first = init_tracing();
    assert_eq!(init_tracing(), first);
    tracing::info!(file = "src/a.js", stage = "drift", "after init");
}

#[test]
fn missing_or_blank_directives_use_defaults() {
    let (filter, rejected) = build_filter(None);
    assert!(rejected.is_none());
    assert_eq!(filter.to_string(), default_filter_text());

    let (filter, rejected) = build_filter(Some("   "));
    assert!(rejected.is_none());
    assert_eq!(filter.to_string(), default_filter_text());
}

#[test]
fn valid_directives_are_kept() {
    let (filter, rejected) = build_filter(Some("manasx_monitor=debug"));
    assert!(rejected.is_none());
    assert_eq!(filter.to_string(), "manasx_monitor=debug");
}

#[test]
fn unparseable_directives_fall_back_with_reason() {
    let (filter, rejected) = build_filter(Some("manasx_monitor=loud"));
    assert!(rejected.is_some());
    assert_eq!(filter.to_string(), default_filter_text());
}

#[test]
fn analysis_field_names_are_distinct() {
    let mut names = metrics::ANALYSIS_FIELDS.to_vec();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), metrics::ANALYSIS_FIELDS.len());
}

/// `EnvFilter` renders directives in its own order.
fn default_filter_text() -> String {
    tracing_subscriber::EnvFilter::new(DEFAULT_DIRECTIVES).to_string()
}
