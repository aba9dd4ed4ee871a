//! Pattern learner: one pass over a source tree reduced to a `PatternProfile`.

pub mod consolidate;
pub mod learner;
pub mod observe;
pub mod types;

pub use consolidate::consolidate;
pub use learner::PatternLearner;
pub use observe::observe_file;
pub use types::{LearnOptions, LearnReport};
