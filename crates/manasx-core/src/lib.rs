//! # manasx-core
//!
//! Foundation crate for the ManasX governance engine.
//! Defines the shared data model, errors, config, events, tracing, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::ManasxConfig;
pub use errors::error_code::ManasxErrorCode;
pub use events::dispatcher::EventDispatcher;
pub use events::handler::ManasxEventHandler;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::severity::Severity;
pub use types::violation::Violation;
