//! Subscriber installation for binaries and tests.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding `EnvFilter` directives.
pub const LOG_ENV: &str = "MANASX_LOG";

/// Used when `MANASX_LOG` is unset, blank or unparseable.
pub const DEFAULT_DIRECTIVES: &str = "manasx_core=info,manasx_analysis=info,manasx_monitor=info";

/// What the first `init_tracing` call found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingInit {
    /// Our subscriber is now the global default.
    Installed,
    /// The host process set a global subscriber first; ours was discarded.
    HostOwned,
}

static OUTCOME: OnceLock<TracingInit> = OnceLock::new();

/// Install a formatting subscriber filtered by `MANASX_LOG`
/// (e.g. `manasx_monitor=debug,manasx_analysis=warn`).
///
/// Only the first call does anything; later calls report the same outcome.
pub fn init_tracing() -> TracingInit {
    *OUTCOME.get_or_init(|| {
        let requested = std::env::var(LOG_ENV).ok();
        let (filter, rejected) = build_filter(requested.as_deref());
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init()
            .is_ok();
        if let Some(reason) = rejected {
            tracing::warn!(env = LOG_ENV, error = %reason, "invalid log filter, using defaults");
        }
        if installed {
            TracingInit::Installed
        } else {
            TracingInit::HostOwned
        }
    })
}

/// Parse `directives`, falling back to [`DEFAULT_DIRECTIVES`]. The second
/// value carries the parse error when the input was rejected.
pub fn build_filter(directives: Option<&str>) -> (EnvFilter, Option<String>) {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => match EnvFilter::try_new(d) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new(DEFAULT_DIRECTIVES), Some(e.to_string())),
        },
        None => (EnvFilter::new(DEFAULT_DIRECTIVES), None),
    }
}
