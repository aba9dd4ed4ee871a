//! ContinuousMonitor: the state machine behind the coordinator task.
//!
//! Every method takes `&mut self` and runs on one task, so the watch set,
//! debounce timers, counters and log files are never touched concurrently.
//! Time is passed in, which lets tests drive debouncing without sleeping.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant as StdInstant};

use chrono::Utc;
use manasx_analysis::ai::{AiClassifier, NullClassifier};
use manasx_analysis::scanner::{has_allowed_extension, relative_path, WalkOptions};
use manasx_core::config::ManasxConfig;
use manasx_core::errors::{error_code, LogError, ManasxErrorCode, MonitorError};
use manasx_core::events::types::{
    ErrorEvent, FileAnalyzedEvent, MonitorStartedEvent, MonitorStoppedEvent,
    ViolationDetectedEvent,
};
use manasx_core::tracing::metrics;
use manasx_core::types::{AnalysisResult, MonitorStats};
use manasx_core::{EventDispatcher, ManasxEventHandler};
use rustc_hash::FxHashSet;
use tokio::time::Instant;
use tracing::field::Empty;
use tracing::Instrument;

use crate::analyzer::FileAnalyzer;
use crate::context::{resolve, MonitorContext, OrganizationalContext};
use crate::debounce::Debouncer;
use crate::logs::{ContextRecord, LogSink, SessionSummary};
use crate::state::MonitorState;
use crate::watcher::{ChangeEvent, ChangeKind, PollWatcher};

pub struct ContinuousMonitor {
    root: PathBuf,
    config: ManasxConfig,
    state: MonitorState,
    context: MonitorContext,
    classifier: Arc<dyn AiClassifier>,
    analyzer: Option<FileAnalyzer>,
    watcher: Option<PollWatcher>,
    /// Set while the watcher is out on a background poll.
    polling: bool,
    debouncer: Debouncer,
    logs: LogSink,
    dispatcher: EventDispatcher,
    analyzed_files: FxHashSet<String>,
}

impl ContinuousMonitor {
    pub fn new(root: impl Into<PathBuf>, config: ManasxConfig) -> Self {
        let root = root.into();
        let logs = LogSink::new(
            resolve(&root, &config.logging.effective_log_dir()),
            config.logging.effective_max_log_size(),
        );
        Self {
            debouncer: Debouncer::new(Duration::from_millis(config.monitor.effective_debounce_ms())),
            logs,
            root,
            config,
            state: MonitorState::Idle,
            context: MonitorContext::default(),
            classifier: Arc::new(NullClassifier),
            analyzer: None,
            watcher: None,
            polling: false,
            dispatcher: EventDispatcher::new(),
            analyzed_files: FxHashSet::default(),
        }
    }

    /// Classifier used when AI detection is enabled. Takes effect on the next start.
    pub fn with_classifier(mut self, classifier: Arc<dyn AiClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_handler(mut self, handler: Arc<dyn ManasxEventHandler>) -> Self {
        self.dispatcher.register(handler);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ManasxConfig {
        &self.config
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn stats(&self) -> &MonitorStats {
        &self.context.stats
    }

    pub fn context(&self) -> &MonitorContext {
        &self.context
    }

    pub fn logs(&self) -> &LogSink {
        &self.logs
    }

    pub fn pending_changes(&self) -> usize {
        self.debouncer.pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.monitor.effective_poll_interval_ms())
    }

    /// `idle → starting → running`. A second start while not idle is logged
    /// and ignored. Log directory or root enumeration failures are fatal and
    /// leave the monitor idle.
    pub async fn start(&mut self) -> Result<(), MonitorError> {
        if self.state != MonitorState::Idle {
            tracing::warn!(state = %self.state, "start ignored, monitor is not idle");
            return Ok(());
        }
        self.state = MonitorState::Starting;
        tracing::info!(root = %self.root.display(), "monitor starting");

        match self.start_inner().await {
            Ok(()) => {
                self.state = MonitorState::Running;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error_code = e.error_code(), error = %e, "monitor failed to start");
                self.watcher = None;
                self.analyzer = None;
                self.state = MonitorState::Idle;
                Err(e)
            }
        }
    }

    async fn start_inner(&mut self) -> Result<(), MonitorError> {
        self.context = MonitorContext::load(&self.root, &self.config);
        self.logs.prepare().await?;

        let mut watcher = self.build_watcher();
        let files_watched = watcher.prime()?;

        let analyzer = FileAnalyzer::new(&self.context, &self.config, Arc::clone(&self.classifier));
        tracing::info!(
            files_watched,
            dirs_watched = watcher.watched_dirs(),
            stages = ?analyzer.enabled_stages(),
            "monitor running"
        );

        self.context.stats = MonitorStats::started_now(files_watched);
        self.analyzed_files.clear();
        self.watcher = Some(watcher);
        self.analyzer = Some(analyzer);

        self.log_context(&ContextRecord::MonitorStarted {
            timestamp: Utc::now(),
            root: self.root.display().to_string(),
            files_watched,
            has_profile: self.context.has_profile(),
            has_rules: self.context.has_rules(),
        })
        .await;
        self.dispatcher.emit_monitor_started(&MonitorStartedEvent {
            root: self.root.clone(),
            files_watched,
            has_profile: self.context.has_profile(),
            has_rules: self.context.has_rules(),
        });
        Ok(())
    }

    fn build_watcher(&self) -> PollWatcher {
        let walk = WalkOptions::from_learn_config(&self.config.learn).unbounded();
        // Our own log files must never feed back into the watch set.
        PollWatcher::new(self.root.clone(), walk).exclude(self.logs.dir())
    }

    /// `running → stopping → idle`. Pending timers are cancelled before the
    /// watcher is dropped. Returns `None` when the monitor was not running.
    pub async fn stop(&mut self) -> Result<Option<SessionSummary>, MonitorError> {
        if !self.is_running() {
            tracing::warn!(state = %self.state, "stop ignored, monitor is not running");
            return Ok(None);
        }
        self.state = MonitorState::Stopping;

        let pending_cancelled = self.debouncer.cancel_all();
        self.watcher = None;
        self.polling = false;
        let uptime_ms = self.context.stats.uptime_ms();

        let mut analyzed_files: Vec<String> = self.analyzed_files.iter().cloned().collect();
        analyzed_files.sort();
        let summary = SessionSummary {
            root: self.root.display().to_string(),
            started_at: self.context.stats.start_time,
            stopped_at: Utc::now(),
            uptime_ms,
            stats: self.context.stats.clone(),
            analyzed_files,
            pending_cancelled,
        };

        let written = self.logs.write_summary(&summary).await;
        self.log_context(&ContextRecord::MonitorStopped {
            timestamp: Utc::now(),
            uptime_ms,
            stats: self.context.stats.clone(),
        })
        .await;
        self.dispatcher.emit_monitor_stopped(&MonitorStoppedEvent {
            uptime_ms,
            stats: self.context.stats.clone(),
        });

        self.analyzer = None;
        self.state = MonitorState::Idle;
        tracing::info!(
            uptime_ms,
            files_analyzed = self.context.stats.files_analyzed,
            violations_found = self.context.stats.violations_found,
            stage_errors = self.context.stats.stage_errors,
            pending_cancelled,
            "monitor stopped"
        );
        written?;
        Ok(Some(summary))
    }

    /// Feed one raw change. Resets the path's debounce timer; a removal
    /// cancels it instead.
    pub fn record_change(&mut self, event: ChangeEvent, now: Instant) {
        if !self.is_running() {
            return;
        }
        self.context.stats.changes_detected += 1;
        if event.kind == ChangeKind::Removed {
            self.debouncer.cancel(&event.path);
            tracing::debug!(file = %event.path.display(), "file removed");
            return;
        }
        if event.kind == ChangeKind::Created {
            self.context.stats.files_watched += 1;
        }
        self.debouncer.touch(&event.path, now);
    }

    /// Poll the watcher and feed every change.
    pub fn poll(&mut self, now: Instant) {
        let events = match self.watcher.as_mut() {
            Some(w) if self.state.is_running() => w.poll(),
            _ => return,
        };
        for event in events {
            self.record_change(event, now);
        }
    }

    /// Lend the watcher out so a poll can walk the tree off this task.
    /// `None` when not running or a poll is already out.
    pub fn take_watcher(&mut self) -> Option<PollWatcher> {
        if !self.is_running() || self.polling {
            return None;
        }
        let watcher = self.watcher.take()?;
        self.polling = true;
        Some(watcher)
    }

    /// Take back a lent watcher and feed the changes it saw. A watcher from
    /// a session that has since stopped is dropped with its changes.
    pub fn restore_watcher(
        &mut self,
        watcher: PollWatcher,
        events: Vec<ChangeEvent>,
        now: Instant,
    ) {
        if !self.polling || self.watcher.is_some() {
            tracing::debug!(dropped = events.len(), "discarding poll from a stopped session");
            return;
        }
        self.polling = false;
        self.watcher = Some(watcher);
        for event in events {
            self.record_change(event, now);
        }
    }

    /// Replace a watcher lost with its poll task. Changes made while it was
    /// out are folded into the fresh baseline.
    pub fn rewatch(&mut self) {
        if !self.is_running() || !self.polling {
            return;
        }
        self.polling = false;
        let mut watcher = self.build_watcher();
        match watcher.prime() {
            Ok(files) => {
                tracing::warn!(files, "watch set rebuilt");
                self.watcher = Some(watcher);
            }
            Err(e) => {
                tracing::error!(error_code = e.error_code(), error = %e, "cannot rebuild watch set, polling stopped");
            }
        }
    }

    /// Analyze every path whose debounce window has passed.
    pub async fn flush_due(&mut self, now: Instant) -> Vec<AnalysisResult> {
        let mut results = Vec::new();
        for path in self.debouncer.due(now) {
            if let Some(result) = self.analyze_file(&path).await {
                results.push(result);
            }
        }
        results
    }

    /// Analyze one file now, log it and update counters. `None` when the
    /// monitor is not running, the file is gone or not watchable, or it
    /// cannot be read.
    pub async fn analyze_file(&mut self, path: &Path) -> Option<AnalysisResult> {
        if !self.is_running() {
            return None;
        }
        let accepts = self.watcher.as_ref().map_or_else(
            || has_allowed_extension(path, &self.config.learn.effective_extensions()),
            |w| w.accepts(path),
        );
        if !accepts || !tokio::fs::try_exists(path).await.unwrap_or(false) {
            tracing::debug!(file = %path.display(), "skipping missing or unwatched file");
            return None;
        }
        let rel = relative_path(&self.root, path);
        let bytes = match tokio::fs::read(path).await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(file = %rel, stage = "read", error = %e, "cannot read changed file");
                self.dispatcher.emit_error(&ErrorEvent {
                    message: e.to_string(),
                    error_code: error_code::SCAN_ERROR.to_string(),
                    file: Some(rel),
                    stage: Some("read".to_string()),
                });
                return None;
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        let span = tracing::info_span!(
            "analyze_file",
            file = %rel,
            analysis_time = Empty,
            compliance_score = Empty,
            violation_count = Empty,
        );
        let started = StdInstant::now();
        let analysis = self
            .analyzer
            .as_ref()?
            .analyze(&rel, &content)
            .instrument(span.clone())
            .await;
        let duration_ms = started.elapsed().as_millis() as u64;
        span.record(metrics::ANALYSIS_TIME, duration_ms);
        span.record(metrics::VIOLATION_COUNT, analysis.result.violations.len() as u64);
        if let Some(score) = analysis.result.drift_score {
            span.record(metrics::COMPLIANCE_SCORE, score);
        }

        for failure in &analysis.failures {
            self.context.stats.stage_errors += 1;
            tracing::error!(file = %rel, stage = failure.stage, error = %failure.message, "analysis stage failed");
            self.dispatcher.emit_error(&ErrorEvent {
                message: failure.message.clone(),
                error_code: error_code::STAGE_FAILED.to_string(),
                file: Some(rel.clone()),
                stage: Some(failure.stage.to_string()),
            });
        }

        let result = analysis.result;
        let stats = &mut self.context.stats;
        stats.files_analyzed += 1;
        stats.violations_found += result.violations.len() as u64;
        if result.ai_detection.as_ref().is_some_and(|d| d.is_likely_ai) {
            stats.ai_code_detected += 1;
        }
        self.analyzed_files.insert(rel.clone());

        tracing::info!(
            file = %rel,
            violation_count = result.violations.len(),
            compliance_score = ?result.drift_score,
            analysis_time = duration_ms,
            "file analyzed"
        );

        self.log_context(&ContextRecord::FileAnalyzed {
            timestamp: Utc::now(),
            duration_ms,
            result: result.clone(),
        })
        .await;
        if let Err(e) = self.logs.write_daily(&result).await {
            self.log_failure(&e, Some(&rel));
        }
        if let Err(e) = self.logs.write_violations(&result).await {
            self.log_failure(&e, Some(&rel));
        }

        for violation in &result.violations {
            self.dispatcher.emit_violation_detected(&ViolationDetectedEvent {
                file: rel.clone(),
                violation: violation.clone(),
            });
        }
        self.dispatcher.emit_file_analyzed(&FileAnalyzedEvent {
            result: result.clone(),
            duration_ms,
        });
        Some(result)
    }

    /// Analyze in-memory code as if it were the file `filename`. Nothing is
    /// written and no counter moves. Works in any state; before the first
    /// start it loads the profile and rules on demand.
    pub async fn check_code_compliance(&self, code: &str, filename: &str) -> AnalysisResult {
        let rel = filename.trim_start_matches("./").replace('\\', "/");
        match &self.analyzer {
            Some(analyzer) => analyzer.analyze(&rel, code).await.result,
            None => {
                let context = MonitorContext::load(&self.root, &self.config);
                FileAnalyzer::new(&context, &self.config, Arc::clone(&self.classifier))
                    .analyze(&rel, code)
                    .await
                    .result
            }
        }
    }

    /// Snapshot for external tooling. Recent analyses are read back from the
    /// context log.
    pub async fn organizational_context(&self) -> OrganizationalContext {
        let n = self.config.monitor.effective_recent_entries();
        let recent = match self.logs.recent_entries(n).await {
            Ok(r) => r,
            Err(e) => {
                self.log_failure(&e, None);
                Vec::new()
            }
        };
        OrganizationalContext::build(self.state, &self.context, recent)
    }

    async fn log_context(&self, record: &ContextRecord) {
        if let Err(e) = self.logs.write_context(record).await {
            self.log_failure(&e, None);
        }
    }

    fn log_failure(&self, e: &LogError, file: Option<&str>) {
        tracing::warn!(file = ?file, stage = "log", error_code = e.error_code(), error = %e, "log write failed");
        self.dispatcher.emit_error(&ErrorEvent {
            message: e.to_string(),
            error_code: e.error_code().to_string(),
            file: file.map(str::to_string),
            stage: Some("log".to_string()),
        });
    }
}

impl std::fmt::Debug for ContinuousMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContinuousMonitor")
            .field("root", &self.root)
            .field("state", &self.state)
            .field("pending", &self.debouncer.pending())
            .finish_non_exhaustive()
    }
}
