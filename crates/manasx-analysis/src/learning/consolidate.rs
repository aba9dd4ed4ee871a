//! Reduce raw tallies to recommendations.
//!
//! Every recommendation is the mode of its tally; ties go to the label seen
//! first. Re-running this on a saved profile's raw counts yields the same
//! recommendations.

use chrono::{DateTime, Utc};
use manasx_core::constants::TOP_N_RECOMMENDATIONS;
use manasx_core::types::profile::{
    ArchitectureRecommendations, CommentDensity, CommentRecommendations, CommentStyle,
    Confidence, ExportStyle, ExtensionStyle, ImportRecommendations, ImportStyle,
    NamingRecommendations, PatternProfile, RawCounts, Recommendations, TestingRecommendations,
};
use manasx_core::types::{NamingConvention, Tally};

/// Build a profile from raw counts.
pub fn consolidate(raw: RawCounts, timestamp: DateTime<Utc>) -> PatternProfile {
    let recommendations = Recommendations {
        naming: NamingRecommendations {
            variables: naming_mode(&raw.naming.variables),
            functions: naming_mode(&raw.naming.functions),
            constants: naming_mode(&raw.naming.constants),
            files: naming_mode(&raw.naming.files),
        },
        imports: ImportRecommendations {
            style: raw.imports.style.mode().and_then(ImportStyle::from_label),
            extensions: raw.imports.extensions.mode().and_then(ExtensionStyle::from_label),
            popular_libraries: raw.imports.libraries.top(TOP_N_RECOMMENDATIONS),
        },
        architecture: ArchitectureRecommendations {
            export_style: raw.exports.mode().and_then(ExportStyle::from_label),
            common_folders: raw.folders.top(TOP_N_RECOMMENDATIONS),
        },
        testing: TestingRecommendations {
            file_naming: raw.testing.file_naming.mode().map(str::to_string),
            framework: raw.testing.framework.mode().map(str::to_string),
        },
        comments: CommentRecommendations {
            style: raw.comments.style.mode().and_then(CommentStyle::from_label),
            density: raw.comments.density.mode().and_then(CommentDensity::from_label),
        },
    };

    PatternProfile {
        timestamp,
        confidence: Confidence::from_file_count(raw.files_analyzed),
        recommendations,
        raw_counts: raw,
    }
}

fn naming_mode(tally: &Tally) -> Option<NamingConvention> {
    tally
        .mode()
        .map(NamingConvention::from_label)
        .filter(|c| *c != NamingConvention::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_and_confidence() {
        let mut raw = RawCounts {
            files_analyzed: 60,
            ..RawCounts::default()
        };
        raw.naming.variables.add_n("camelCase", 54);
        raw.naming.variables.add_n("snake_case", 6);
        raw.imports.style.add_n("absolute", 2);
        raw.imports.style.add_n("relative", 2);

        let profile = consolidate(raw, Utc::now());
        assert_eq!(profile.confidence, Confidence::High);
        assert_eq!(
            profile.recommendations.naming.variables,
            Some(NamingConvention::CamelCase)
        );
        // tie resolved by first-seen
        assert_eq!(profile.recommendations.imports.style, Some(ImportStyle::Absolute));
        assert_eq!(profile.recommendations.naming.functions, None);
    }

    #[test]
    fn reconsolidation_is_stable() {
        let mut raw = RawCounts {
            files_analyzed: 3,
            ..RawCounts::default()
        };
        raw.folders.add_n("utils", 1);
        raw.folders.add_n("components", 1);
        let first = consolidate(raw.clone(), Utc::now());
        let json = serde_json::to_string(&first.raw_counts).unwrap();
        let reloaded: RawCounts = serde_json::from_str(&json).unwrap();
        let second = consolidate(reloaded, first.timestamp);
        assert_eq!(first.recommendations, second.recommendations);
        assert_eq!(
            second.recommendations.architecture.common_folders,
            vec!["utils".to_string(), "components".to_string()]
        );
    }
}
