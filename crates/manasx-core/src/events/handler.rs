//! ManasxEventHandler trait, every method a no-op by default.

use super::types::*;

/// Trait for handling monitor events.
///
/// Handlers only override the events they care about. `Send + Sync` so a
/// handler can be shared with the coordinator task.
pub trait ManasxEventHandler: Send + Sync {
    fn on_monitor_started(&self, _event: &MonitorStartedEvent) {}
    fn on_file_analyzed(&self, _event: &FileAnalyzedEvent) {}
    fn on_violation_detected(&self, _event: &ViolationDetectedEvent) {}
    fn on_monitor_stopped(&self, _event: &MonitorStoppedEvent) {}
    fn on_error(&self, _event: &ErrorEvent) {}
}
