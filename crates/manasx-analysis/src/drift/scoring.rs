//! Compliance scoring.

use manasx_core::types::Violation;

/// `100 - min(Σ penalty, 100)` where each penalty is the doubled severity
/// weight. Always within 0..=100 and never increases as violations are added.
pub fn compliance_score(violations: &[Violation]) -> u32 {
    let penalty: u32 = violations
        .iter()
        .map(|v| v.severity.penalty())
        .fold(0u32, |acc, p| acc.saturating_add(p));
    100 - penalty.min(100)
}

/// Arithmetic mean of per-file scores, rounded; 100 for no files.
pub fn directory_score(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 100;
    }
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    (sum as f64 / scores.len() as f64).round() as u32
}
