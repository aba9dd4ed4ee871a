//! Tests for the ManasX event system.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use manasx_core::events::dispatcher::EventDispatcher;
use manasx_core::events::handler::ManasxEventHandler;
use manasx_core::events::types::*;
use manasx_core::types::{AnalysisResult, MonitorStats, Severity, Violation};

#[derive(Default)]
struct CountingHandler {
    started: AtomicUsize,
    analyzed: AtomicUsize,
    violations: AtomicUsize,
    stopped: AtomicUsize,
    errors: AtomicUsize,
}

impl ManasxEventHandler for CountingHandler {
    fn on_monitor_started(&self, _event: &MonitorStartedEvent) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    fn on_file_analyzed(&self, _event: &FileAnalyzedEvent) {
        self.analyzed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_violation_detected(&self, _event: &ViolationDetectedEvent) {
        self.violations.fetch_add(1, Ordering::Relaxed);
    }

    fn on_monitor_stopped(&self, _event: &MonitorStoppedEvent) {
        self.stopped.fetch_add(1, Ordering::Relaxed);
    }

    fn on_error(&self, _event: &ErrorEvent) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl ManasxEventHandler for PanickingHandler {
    fn on_file_analyzed(&self, _event: &FileAnalyzedEvent) {
        panic!("handler bug");
    }
}

fn started() -> MonitorStartedEvent {
    MonitorStartedEvent {
        root: PathBuf::from("/tmp/project"),
        files_watched: 3,
        has_profile: true,
        has_rules: false,
    }
}

#[test]
fn test_handler_noop_defaults() {
    struct NoopHandler;
    impl ManasxEventHandler for NoopHandler {}

    let handler = NoopHandler;
    handler.on_monitor_started(&started());
    handler.on_error(&ErrorEvent {
        message: "boom".into(),
        error_code: "TEST".into(),
        file: None,
        stage: None,
    });
}

#[test]
fn test_dispatcher_zero_handlers() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_monitor_started(&started());
}

#[test]
fn test_dispatch_reaches_every_handler() {
    let a = Arc::new(CountingHandler::default());
    let b = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());

    dispatcher.emit_monitor_started(&started());
    dispatcher.emit_violation_detected(&ViolationDetectedEvent {
        file: "src/a.js".into(),
        violation: Violation::new(
            "security/no-eval",
            "rule",
            "security",
            Severity::Critical,
            "eval",
            "src/a.js",
            1,
        ),
    });
    dispatcher.emit_monitor_stopped(&MonitorStoppedEvent {
        uptime_ms: 10,
        stats: MonitorStats::default(),
    });

    for h in [&a, &b] {
        assert_eq!(h.started.load(Ordering::Relaxed), 1);
        assert_eq!(h.violations.load(Ordering::Relaxed), 1);
        assert_eq!(h.stopped.load(Ordering::Relaxed), 1);
        assert_eq!(h.errors.load(Ordering::Relaxed), 0);
    }
}

#[test]
fn test_panicking_handler_is_isolated() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_file_analyzed(&FileAnalyzedEvent {
        result: AnalysisResult::new("src/a.js"),
        duration_ms: 1,
    });
    assert_eq!(counter.analyzed.load(Ordering::Relaxed), 1);
}
