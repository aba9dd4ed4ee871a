//! EventDispatcher: synchronous fan-out to registered handlers.

use std::sync::Arc;

use super::handler::ManasxEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// With no handlers registered, `emit` iterates over an empty Vec.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ManasxEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn ManasxEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A handler that panics is logged and skipped; later handlers still run.
    fn emit<F: Fn(&dyn ManasxEventHandler)>(&self, event: &'static str, f: F) {
        for (index, handler) in self.handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!(event, handler = index, "event handler panicked");
            }
        }
    }

    pub fn emit_monitor_started(&self, event: &MonitorStartedEvent) {
        self.emit("monitor_started", |h| h.on_monitor_started(event));
    }

    pub fn emit_file_analyzed(&self, event: &FileAnalyzedEvent) {
        self.emit("file_analyzed", |h| h.on_file_analyzed(event));
    }

    pub fn emit_violation_detected(&self, event: &ViolationDetectedEvent) {
        self.emit("violation_detected", |h| h.on_violation_detected(event));
    }

    pub fn emit_monitor_stopped(&self, event: &MonitorStoppedEvent) {
        self.emit("monitor_stopped", |h| h.on_monitor_stopped(event));
    }

    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit("error", |h| h.on_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
