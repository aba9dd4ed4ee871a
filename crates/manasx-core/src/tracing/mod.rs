//! Observability for ManasX: an `EnvFilter`-driven subscriber and the
//! field names recorded on analysis spans.

pub mod metrics;
pub mod setup;

pub use setup::{build_filter, init_tracing, TracingInit};
