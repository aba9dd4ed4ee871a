//! Stack-based directory walker.
//!
//! Depth-first with an explicit stack so memory stays bounded by the number
//! of pending directories, not the depth of recursion. Entries are visited
//! in name order, symlinks are never followed.

use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use manasx_core::errors::ScanError;

use super::types::{WalkOptions, WalkOutcome};

/// Walk `root` and collect every file that passes `options`.
///
/// A root that is missing or unreadable is an error. An unreadable
/// subdirectory is recorded in `skipped_dirs` and the walk continues.
pub fn walk(root: &Path, options: &WalkOptions) -> Result<WalkOutcome, ScanError> {
    let start = Instant::now();
    if !root.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut outcome = WalkOutcome::default();
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];

    'walk: while let Some(dir) = stack.pop() {
        let mut entries = match std::fs::read_dir(&dir) {
            Ok(rd) => rd.filter_map(Result::ok).collect::<Vec<_>>(),
            Err(e) if dir == root => {
                return Err(ScanError::IoError {
                    path: dir,
                    source: e,
                });
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                outcome.errors.push(format!("{}: {e}", dir.display()));
                outcome.skipped_dirs.push(dir);
                continue;
            }
        };
        entries.sort_by_key(|e| e.file_name());

        let mut subdirs = Vec::new();
        for entry in entries {
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    outcome.errors.push(format!("{}: {e}", entry.path().display()));
                    continue;
                }
            };
            if file_type.is_symlink() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if file_type.is_dir() {
                if !options.ignored_dirs.iter().any(|d| d == name.as_ref()) {
                    subdirs.push(entry.path());
                }
                continue;
            }
            if !file_type.is_file() {
                continue;
            }
            let path = entry.path();
            if !has_allowed_extension(&path, &options.extensions) {
                continue;
            }
            if let Some(max) = options.max_files {
                if outcome.files.len() >= max {
                    outcome.truncated = true;
                    break 'walk;
                }
            }
            outcome.files.push(path);
        }

        // Reverse so the alphabetically first subdirectory is popped next.
        stack.extend(subdirs.into_iter().rev());
    }

    tracing::debug!(
        root = %root.display(),
        files = outcome.files.len(),
        skipped_dirs = outcome.skipped_dirs.len(),
        walk_duration = start.elapsed().as_millis() as u64,
        "walk complete"
    );
    Ok(outcome)
}

/// True when `path`'s extension is in `extensions` (case-insensitive).
/// An empty allow-list accepts everything.
pub fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// `path` relative to `root` with forward slashes. Falls back to the path
/// itself when it is not under `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_is_case_insensitive() {
        let exts = vec!["js".to_string(), "ts".to_string()];
        assert!(has_allowed_extension(Path::new("a/B.JS"), &exts));
        assert!(!has_allowed_extension(Path::new("a/b.css"), &exts));
        assert!(!has_allowed_extension(Path::new("Makefile"), &exts));
        assert!(has_allowed_extension(Path::new("Makefile"), &[]));
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_path(root, &root.join("src").join("app.js")),
            "src/app.js"
        );
        assert_eq!(relative_path(root, Path::new("lib/x.js")), "lib/x.js");
    }
}
