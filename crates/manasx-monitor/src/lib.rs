//! # manasx-monitor
//!
//! Continuous monitor for the ManasX governance pipeline: watches a source
//! tree, debounces changes, analyzes each settled file through the AI, drift
//! and rule stages, and keeps append-only logs that back the organizational
//! context.

pub mod actor;
pub mod analyzer;
pub mod context;
pub mod debounce;
pub mod logs;
pub mod monitor;
pub mod query;
pub mod state;
pub mod watcher;

pub use actor::{spawn, MonitorHandle};
pub use analyzer::FileAnalyzer;
pub use context::{MonitorContext, OrganizationalContext};
pub use debounce::Debouncer;
pub use logs::{ContextRecord, LogSink, SessionSummary};
pub use monitor::ContinuousMonitor;
pub use query::{HealthStatus, QuerySurface};
pub use state::MonitorState;
pub use watcher::{ChangeEvent, ChangeKind, PollWatcher};
