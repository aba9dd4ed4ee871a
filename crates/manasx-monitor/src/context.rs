//! Monitor-owned state: loaded profile and rules plus the session counters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use manasx_analysis::rules::{RuleConfig, RuleConfigSummary};
use manasx_core::config::ManasxConfig;
use manasx_core::errors::ManasxErrorCode;
use manasx_core::types::profile::{PatternProfile, ProfileSummary};
use manasx_core::types::{AnalysisResult, MonitorStats};
use serde::{Deserialize, Serialize};

use crate::state::MonitorState;

/// Everything one monitor instance knows. Owned by the monitor, never global,
/// so several monitors can live in one process.
#[derive(Debug, Clone, Default)]
pub struct MonitorContext {
    pub profile: Option<Arc<PatternProfile>>,
    pub profile_path: Option<PathBuf>,
    pub rules: Option<RuleConfig>,
    pub rules_path: Option<PathBuf>,
    pub stats: MonitorStats,
}

impl MonitorContext {
    /// Load the profile and rule configuration named by `config`. A missing
    /// profile turns drift detection off. A missing rules file falls back to
    /// the built-in rules; an invalid one turns rule checking off.
    pub fn load(root: &Path, config: &ManasxConfig) -> Self {
        let mut context = Self::default();

        let profile_path = resolve(root, &config.learn.effective_profile_path());
        match PatternProfile::load(&profile_path) {
            Ok(profile) => {
                tracing::info!(path = %profile_path.display(), confidence = %profile.confidence, "pattern profile loaded");
                context.profile = Some(Arc::new(profile));
                context.profile_path = Some(profile_path);
            }
            Err(e) => {
                tracing::warn!(
                    path = %profile_path.display(),
                    error_code = e.error_code(),
                    error = %e,
                    "no pattern profile, drift detection disabled"
                );
            }
        }

        let rules_file = config.detect.effective_rules_file();
        match RuleConfig::load(root, &rules_file) {
            Ok((rules, path)) => {
                context.rules = Some(rules);
                context.rules_path = path;
            }
            Err(e) => {
                tracing::warn!(
                    file = %rules_file,
                    error_code = e.error_code(),
                    error = %e,
                    "invalid rule configuration, rule checking disabled"
                );
            }
        }

        context
    }

    pub fn has_profile(&self) -> bool {
        self.profile.is_some()
    }

    pub fn has_rules(&self) -> bool {
        self.rules.is_some()
    }
}

/// `path` as given when absolute, else under `root`.
pub fn resolve(root: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

/// Read-only snapshot served to external tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationalContext {
    pub timestamp: DateTime<Utc>,
    pub state: MonitorState,
    pub has_profile: bool,
    pub has_rules: bool,
    pub profile: Option<ProfileSummary>,
    pub rules: Option<RuleConfigSummary>,
    pub stats: MonitorStats,
    pub uptime_ms: u64,
    /// Newest first.
    pub recent_analyses: Vec<AnalysisResult>,
}

impl OrganizationalContext {
    pub fn build(
        state: MonitorState,
        context: &MonitorContext,
        recent_analyses: Vec<AnalysisResult>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            state,
            has_profile: context.has_profile(),
            has_rules: context.has_rules(),
            profile: context.profile.as_deref().map(PatternProfile::summary),
            rules: context.rules.as_ref().map(RuleConfig::summary),
            uptime_ms: if state.is_running() {
                context.stats.uptime_ms()
            } else {
                0
            },
            stats: context.stats.clone(),
            recent_analyses,
        }
    }
}
