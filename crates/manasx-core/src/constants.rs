//! Shared constants for the ManasX governance engine.

/// ManasX version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default rule configuration file name, discovered by upward search.
pub const DEFAULT_RULES_FILE: &str = "manasx-rules.json";

/// Default pattern profile file name, relative to the project root.
pub const DEFAULT_PROFILE_FILE: &str = "manasx-patterns.json";

/// Project-level engine configuration file.
pub const PROJECT_CONFIG_FILE: &str = "manasx.toml";

/// Default maximum number of files the learner analyzes.
pub const DEFAULT_MAX_FILES: usize = 1000;

/// Default extension allow-list for learning and monitoring.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Directory names skipped during every walk.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
    ".nuxt",
    "out",
    "target",
    "vendor",
    "__pycache__",
    ".venv",
    ".manasx",
];

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Default polling interval of the file watcher in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default timeout for one external classifier call in milliseconds.
pub const DEFAULT_CLASSIFIER_TIMEOUT_MS: u64 = 30_000;

/// Default log directory, relative to the project root.
pub const DEFAULT_LOG_DIR: &str = ".manasx/logs";

/// Default size cap of a single log file before rotation (10MB).
pub const DEFAULT_MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Default number of recent analyzed-file entries in the organizational context.
pub const DEFAULT_RECENT_ENTRIES: usize = 10;

/// Default compliance threshold below which a file counts as drifted.
pub const DEFAULT_DRIFT_THRESHOLD: u32 = 80;

/// Default number of context lines attached to each drift violation.
pub const DEFAULT_CONTEXT_SIZE: usize = 2;

/// Modules whose import always counts as drift.
pub const DEFAULT_BLOCKED_MODULES: &[&str] = &["eval", "vm", "child_process"];

/// Default wrapper that replaces raw `fetch(` calls.
pub const DEFAULT_FETCH_WRAPPER: &str = "companyFetch";

/// Learner confidence thresholds on total files analyzed.
pub const CONFIDENCE_MEDIUM_MIN_FILES: usize = 10;
pub const CONFIDENCE_HIGH_MIN_FILES: usize = 50;

/// Maximum entries kept in the `popularLibraries` and `commonFolders` lists.
pub const TOP_N_RECOMMENDATIONS: usize = 10;
