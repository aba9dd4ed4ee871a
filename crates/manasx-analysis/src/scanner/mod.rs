//! Scanner subsystem: deterministic file discovery and content hashing.
//!
//! Shared by the pattern learner (corpus enumeration) and the monitor
//! (watch-set enumeration and change stamps).

pub mod hasher;
pub mod types;
pub mod walker;

pub use hasher::hash_content;
pub use types::{WalkOptions, WalkOutcome};
pub use walker::{has_allowed_extension, relative_path, walk};
