//! Append-only log sinks with size-based rotation.
//!
//! Layout under the log directory:
//! - `context.jsonl`: one tagged JSON record per lifecycle event or analyzed file
//! - `daily/YYYY-MM-DD.log`: one fixed-width line per analyzed file
//! - `violations/YYYY-MM-DD.log`: per-file reports grouped by severity,
//!   written only when a file has violations
//! - `session-summary.json`: written on stop
//!
//! A file over `max_size` is renamed to `<file>.<epoch-ms>` before the next
//! append. The size check and the append happen inside one call on the
//! coordinator task, so no append can interleave with a rotation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use manasx_core::errors::LogError;
use manasx_core::types::{AnalysisResult, MonitorStats, Severity};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

pub const CONTEXT_LOG: &str = "context.jsonl";
pub const DAILY_DIR: &str = "daily";
pub const VIOLATIONS_DIR: &str = "violations";
pub const SESSION_SUMMARY: &str = "session-summary.json";

/// One line of `context.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ContextRecord {
    MonitorStarted {
        timestamp: DateTime<Utc>,
        root: String,
        files_watched: usize,
        has_profile: bool,
        has_rules: bool,
    },
    FileAnalyzed {
        timestamp: DateTime<Utc>,
        duration_ms: u64,
        result: AnalysisResult,
    },
    MonitorStopped {
        timestamp: DateTime<Utc>,
        uptime_ms: u64,
        stats: MonitorStats,
    },
}

/// Final report of one monitoring session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub root: String,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: DateTime<Utc>,
    pub uptime_ms: u64,
    pub stats: MonitorStats,
    /// Relative paths analyzed at least once, sorted.
    pub analyzed_files: Vec<String>,
    /// Debounce timers dropped by the stop.
    pub pending_cancelled: usize,
}

#[derive(Debug, Clone)]
pub struct LogSink {
    dir: PathBuf,
    max_size: u64,
}

impl LogSink {
    pub fn new(dir: impl Into<PathBuf>, max_size: u64) -> Self {
        Self {
            dir: dir.into(),
            max_size,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn context_path(&self) -> PathBuf {
        self.dir.join(CONTEXT_LOG)
    }

    pub fn daily_path(&self, at: DateTime<Utc>) -> PathBuf {
        self.dir.join(DAILY_DIR).join(format!("{}.log", at.format("%Y-%m-%d")))
    }

    pub fn violations_path(&self, at: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(VIOLATIONS_DIR)
            .join(format!("{}.log", at.format("%Y-%m-%d")))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(SESSION_SUMMARY)
    }

    /// Create the directory layout and rotate any oversized log.
    pub async fn prepare(&self) -> Result<(), LogError> {
        for dir in [
            self.dir.clone(),
            self.dir.join(DAILY_DIR),
            self.dir.join(VIOLATIONS_DIR),
        ] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| LogError::CreateDir { path: dir, source: e })?;
        }
        let now = Utc::now();
        for path in [
            self.context_path(),
            self.daily_path(now),
            self.violations_path(now),
        ] {
            self.rotate_if_needed(&path).await?;
        }
        Ok(())
    }

    pub async fn write_context(&self, record: &ContextRecord) -> Result<(), LogError> {
        let line = serde_json::to_string(record).map_err(|e| LogError::Serialize(e.to_string()))?;
        self.append(&self.context_path(), &format!("{line}\n")).await
    }

    pub async fn write_daily(&self, result: &AnalysisResult) -> Result<(), LogError> {
        self.append(&self.daily_path(result.timestamp), &format!("{}\n", daily_line(result)))
            .await
    }

    /// No-op for a clean result.
    pub async fn write_violations(&self, result: &AnalysisResult) -> Result<(), LogError> {
        if result.violations.is_empty() {
            return Ok(());
        }
        self.append(&self.violations_path(result.timestamp), &violations_report(result))
            .await
    }

    /// Overwrites any previous summary.
    pub async fn write_summary(&self, summary: &SessionSummary) -> Result<(), LogError> {
        let path = self.summary_path();
        let json =
            serde_json::to_string_pretty(summary).map_err(|e| LogError::Serialize(e.to_string()))?;
        tokio::fs::write(&path, format!("{json}\n"))
            .await
            .map_err(|e| LogError::Write { path, source: e })
    }

    /// The last `n` analyzed-file records, newest first, read back from the
    /// current context log. Unparseable lines are skipped.
    pub async fn recent_entries(&self, n: usize) -> Result<Vec<AnalysisResult>, LogError> {
        let path = self.context_path();
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LogError::Write { path, source: e }),
        };
        Ok(text
            .lines()
            .rev()
            .filter_map(|line| match serde_json::from_str::<ContextRecord>(line) {
                Ok(ContextRecord::FileAnalyzed { result, .. }) => Some(result),
                _ => None,
            })
            .take(n)
            .collect())
    }

    async fn append(&self, path: &Path, text: &str) -> Result<(), LogError> {
        self.rotate_if_needed(path).await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| LogError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| LogError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        file.flush().await.map_err(|e| LogError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }

    async fn rotate_if_needed(&self, path: &Path) -> Result<(), LogError> {
        let size = match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(_) => return Ok(()),
        };
        if size <= self.max_size {
            return Ok(());
        }
        let mut stamp = Utc::now().timestamp_millis();
        let rotated = loop {
            let mut candidate = path.as_os_str().to_owned();
            candidate.push(format!(".{stamp}"));
            let candidate = PathBuf::from(candidate);
            if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                break candidate;
            }
            stamp += 1;
        };
        tokio::fs::rename(path, &rotated)
            .await
            .map_err(|e| LogError::Rotate {
                path: path.to_path_buf(),
                source: e,
            })?;
        tracing::info!(from = %path.display(), to = %rotated.display(), size, "log rotated");
        Ok(())
    }
}

/// `HH:MM:SS STATUS SCORE VIOLS AI FILE`, fixed width.
pub fn daily_line(result: &AnalysisResult) -> String {
    let status = if result.violations.is_empty() { "OK" } else { "ISSUES" };
    let score = result
        .drift_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let ai = match &result.ai_detection {
        Some(d) if d.is_likely_ai => "AI",
        _ => "--",
    };
    format!(
        "{} {:<6} {:>5} {:>5} {:<2} {}",
        result.timestamp.format("%H:%M:%S"),
        status,
        score,
        result.violations.len(),
        ai,
        result.file
    )
}

/// Per-file block with violations grouped by severity, most severe first.
pub fn violations_report(result: &AnalysisResult) -> String {
    let mut out = format!(
        "=== {} {} ({} violations) ===\n",
        result.timestamp.to_rfc3339(),
        result.file,
        result.violations.len()
    );
    for severity in Severity::ALL {
        let group: Vec<_> = result
            .violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("[{}]\n", severity.as_str().to_uppercase()));
        for v in group {
            let column = v.column.map(|c| format!(":{c}")).unwrap_or_default();
            out.push_str(&format!("  {}{} {} {}\n", v.line, column, v.rule_id, v.message));
            if let Some(s) = &v.suggestion {
                out.push_str(&format!("      fix: {s}\n"));
            }
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use manasx_core::types::Violation;

    fn result_with(violations: Vec<Violation>) -> AnalysisResult {
        let mut r = AnalysisResult::new("src/a/b.js");
        r.violations = violations;
        r.drift_score = Some(90);
        r
    }

    fn v(severity: Severity, line: usize) -> Violation {
        Violation::new("security/no-eval", "rule", "security", severity, "msg", "src/a/b.js", line)
    }

    #[test]
    fn report_groups_by_severity() {
        let r = result_with(vec![v(Severity::Low, 4), v(Severity::Critical, 2)]);
        let report = violations_report(&r);
        let critical = report.find("[CRITICAL]").unwrap();
        let low = report.find("[LOW]").unwrap();
        assert!(critical < low);
        assert!(!report.contains("[HIGH]"));
    }

    #[test]
    fn daily_line_is_fixed_width() {
        let clean = daily_line(&result_with(vec![]));
        let dirty = daily_line(&result_with(vec![v(Severity::Low, 1)]));
        let prefix = |s: &str| s.find("src/").unwrap();
        assert_eq!(prefix(&clean), prefix(&dirty));
        assert!(dirty.contains("ISSUES"));
    }

    #[tokio::test]
    async fn rotation_and_recent_entries() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::new(dir.path().join("logs"), 200);
        sink.prepare().await.unwrap();

        for i in 0..5 {
            let mut r = result_with(vec![]);
            r.file = format!("src/f{i}.js");
            sink.write_context(&ContextRecord::FileAnalyzed {
                timestamp: Utc::now(),
                duration_ms: 1,
                result: r,
            })
            .await
            .unwrap();
        }

        let rotated = std::fs::read_dir(sink.dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("context.jsonl."))
            .count();
        assert!(rotated >= 1);

        // Only the current file is read back, newest first.
        let recent = sink.recent_entries(10).await.unwrap();
        assert!(!recent.is_empty());
        assert_eq!(recent[0].file, "src/f4.js");
    }
}
