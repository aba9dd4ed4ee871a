//! Learned pattern profile and its persisted form.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::naming::NamingConvention;
use super::tally::Tally;
use crate::constants::{CONFIDENCE_HIGH_MIN_FILES, CONFIDENCE_MEDIUM_MIN_FILES};
use crate::errors::ProfileError;

/// Coarse confidence in a profile, a function of sample size only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// <10 files is low, <50 is medium, anything else high.
    pub fn from_file_count(files: usize) -> Self {
        if files < CONFIDENCE_MEDIUM_MIN_FILES {
            Self::Low
        } else if files < CONFIDENCE_HIGH_MIN_FILES {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// Relative (`./x`, `../x`) versus package or alias imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStyle {
    Relative,
    Absolute,
}

/// Whether relative imports spell out the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionStyle {
    Explicit,
    Implicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStyle {
    Named,
    Default,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentStyle {
    SingleLine,
    MultiLine,
    Doc,
}

/// Comment-to-line ratio bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentDensity {
    None,
    Low,
    Medium,
    High,
}

impl CommentDensity {
    /// 0 is none, below 0.10 low, below 0.20 medium, otherwise high.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= 0.0 {
            Self::None
        } else if ratio < 0.10 {
            Self::Low
        } else if ratio < 0.20 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

macro_rules! label_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum!(ImportStyle { Relative => "relative", Absolute => "absolute" });
label_enum!(ExtensionStyle { Explicit => "explicit", Implicit => "implicit" });
label_enum!(ExportStyle { Named => "named", Default => "default", Mixed => "mixed" });
label_enum!(CommentStyle { SingleLine => "single-line", MultiLine => "multi-line", Doc => "doc" });
label_enum!(CommentDensity { None => "none", Low => "low", Medium => "medium", High => "high" });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingRecommendations {
    pub variables: Option<NamingConvention>,
    pub functions: Option<NamingConvention>,
    pub constants: Option<NamingConvention>,
    pub files: Option<NamingConvention>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecommendations {
    pub style: Option<ImportStyle>,
    pub extensions: Option<ExtensionStyle>,
    #[serde(default)]
    pub popular_libraries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureRecommendations {
    pub export_style: Option<ExportStyle>,
    #[serde(default)]
    pub common_folders: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingRecommendations {
    /// `.test`, `.spec` or `__tests__`.
    pub file_naming: Option<String>,
    pub framework: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecommendations {
    pub style: Option<CommentStyle>,
    pub density: Option<CommentDensity>,
}

/// The dominant convention per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recommendations {
    pub naming: NamingRecommendations,
    pub imports: ImportRecommendations,
    pub architecture: ArchitectureRecommendations,
    pub testing: TestingRecommendations,
    pub comments: CommentRecommendations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamingCounts {
    pub variables: Tally,
    pub functions: Tally,
    pub constants: Tally,
    pub files: Tally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportCounts {
    pub style: Tally,
    pub extensions: Tally,
    pub libraries: Tally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestingCounts {
    pub file_naming: Tally,
    pub framework: Tally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentCounts {
    pub style: Tally,
    pub density: Tally,
}

/// Supporting tallies behind the recommendations, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCounts {
    pub files_analyzed: usize,
    pub naming: NamingCounts,
    pub imports: ImportCounts,
    pub exports: Tally,
    pub folders: Tally,
    pub file_types: Tally,
    pub testing: TestingCounts,
    pub comments: CommentCounts,
}

impl RawCounts {
    /// Fold another file's (or batch's) counts into this one.
    pub fn merge(&mut self, other: &RawCounts) {
        self.files_analyzed += other.files_analyzed;
        self.naming.variables.merge(&other.naming.variables);
        self.naming.functions.merge(&other.naming.functions);
        self.naming.constants.merge(&other.naming.constants);
        self.naming.files.merge(&other.naming.files);
        self.imports.style.merge(&other.imports.style);
        self.imports.extensions.merge(&other.imports.extensions);
        self.imports.libraries.merge(&other.imports.libraries);
        self.exports.merge(&other.exports);
        self.folders.merge(&other.folders);
        self.file_types.merge(&other.file_types);
        self.testing.file_naming.merge(&other.testing.file_naming);
        self.testing.framework.merge(&other.testing.framework);
        self.comments.style.merge(&other.comments.style);
        self.comments.density.merge(&other.comments.density);
    }
}

/// Output of one learning pass. Immutable once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternProfile {
    pub timestamp: DateTime<Utc>,
    pub confidence: Confidence,
    pub recommendations: Recommendations,
    #[serde(default)]
    pub raw_counts: RawCounts,
}

/// Trimmed view of a profile for the organizational context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub timestamp: DateTime<Utc>,
    pub confidence: Confidence,
    pub files_analyzed: usize,
    pub naming: NamingRecommendations,
    pub import_style: Option<ImportStyle>,
    pub export_style: Option<ExportStyle>,
    pub top_libraries: Vec<String>,
    pub common_folders: Vec<String>,
    pub comment_density: Option<CommentDensity>,
}

impl PatternProfile {
    /// Read a profile from disk.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProfileError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ProfileError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        serde_json::from_str(&content).map_err(|e| ProfileError::InvalidJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write the profile as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProfileError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ProfileError::InvalidJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| ProfileError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            timestamp: self.timestamp,
            confidence: self.confidence,
            files_analyzed: self.raw_counts.files_analyzed,
            naming: self.recommendations.naming.clone(),
            import_style: self.recommendations.imports.style,
            export_style: self.recommendations.architecture.export_style,
            top_libraries: self
                .recommendations
                .imports
                .popular_libraries
                .iter()
                .take(5)
                .cloned()
                .collect(),
            common_folders: self.recommendations.architecture.common_folders.clone(),
            comment_density: self.recommendations.comments.density,
        }
    }
}
