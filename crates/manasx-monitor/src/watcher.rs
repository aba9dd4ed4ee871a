//! Polling watcher: two-level change detection over the watch set.
//!
//! Level 1 compares mtime and size. Level 2 hashes content only for files
//! whose metadata moved, so a touch without an edit is not a change. Each
//! poll re-lists the tree, which also catches creates, deletes and renames.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use manasx_analysis::scanner::{hash_content, walk, WalkOptions};
use manasx_core::errors::ScanError;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
}

/// One raw filesystem change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    mtime: Option<SystemTime>,
    size: u64,
    hash: u64,
}

impl FileStamp {
    fn read(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let bytes = std::fs::read(path)?;
        Ok(Self {
            mtime: meta.modified().ok(),
            size: meta.len(),
            hash: hash_content(&bytes),
        })
    }
}

#[derive(Debug)]
pub struct PollWatcher {
    root: PathBuf,
    options: WalkOptions,
    /// Subtrees never watched, matched by path prefix.
    excluded: Vec<PathBuf>,
    stamps: FxHashMap<PathBuf, FileStamp>,
    /// Directories holding watched files, for the startup summary.
    dirs: FxHashSet<PathBuf>,
}

impl PollWatcher {
    pub fn new(root: impl Into<PathBuf>, options: WalkOptions) -> Self {
        Self {
            root: root.into(),
            options: options.unbounded(),
            excluded: Vec::new(),
            stamps: FxHashMap::default(),
            dirs: FxHashSet::default(),
        }
    }

    /// Skip everything under `dir`. Unlike `ignored_dirs`, which matches
    /// directory names anywhere, this drops exactly one subtree.
    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|dir| path.starts_with(dir))
    }

    /// Enumerate and stamp the watch set. Fails only when the root cannot be
    /// listed. Returns the number of watched files.
    pub fn prime(&mut self) -> Result<usize, ScanError> {
        let outcome = walk(&self.root, &self.options)?;
        self.stamps.clear();
        self.dirs.clear();
        for path in outcome.files {
            if self.is_excluded(&path) {
                continue;
            }
            match FileStamp::read(&path) {
                Ok(stamp) => {
                    if let Some(parent) = path.parent() {
                        self.dirs.insert(parent.to_path_buf());
                    }
                    self.stamps.insert(path, stamp);
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "cannot stamp file, not watching it");
                }
            }
        }
        tracing::debug!(
            root = %self.root.display(),
            files = self.stamps.len(),
            dirs = self.dirs.len(),
            "watch set primed"
        );
        Ok(self.stamps.len())
    }

    /// Compare the tree against the stamps and update them. Events come out
    /// in path order.
    pub fn poll(&mut self) -> Vec<ChangeEvent> {
        let outcome = match walk(&self.root, &self.options) {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "poll could not list root");
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        let mut seen: FxHashSet<PathBuf> = FxHashSet::default();
        for path in outcome.files {
            if self.is_excluded(&path) {
                continue;
            }
            seen.insert(path.clone());
            let previous = self.stamps.get(&path).copied();
            let meta = match std::fs::metadata(&path) {
                Ok(m) => m,
                Err(_) => continue,
            };
            let unchanged_meta = previous.is_some_and(|p| {
                p.mtime.is_some() && p.mtime == meta.modified().ok() && p.size == meta.len()
            });
            if unchanged_meta {
                continue;
            }
            let stamp = match FileStamp::read(&path) {
                Ok(s) => s,
                Err(e) => {
                    tracing::debug!(file = %path.display(), error = %e, "file vanished mid-poll");
                    continue;
                }
            };
            let kind = match previous {
                None => Some(ChangeKind::Created),
                Some(p) if p.hash != stamp.hash => Some(ChangeKind::Modified),
                Some(_) => None,
            };
            if let Some(parent) = path.parent() {
                self.dirs.insert(parent.to_path_buf());
            }
            self.stamps.insert(path.clone(), stamp);
            if let Some(kind) = kind {
                events.push(ChangeEvent::new(path, kind));
            }
        }

        let removed: Vec<PathBuf> = self
            .stamps
            .keys()
            .filter(|p| !seen.contains(*p))
            .cloned()
            .collect();
        for path in removed {
            self.stamps.remove(&path);
            events.push(ChangeEvent::new(path, ChangeKind::Removed));
        }

        events.sort_by(|a, b| a.path.cmp(&b.path));
        events
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn watched_files(&self) -> usize {
        self.stamps.len()
    }

    pub fn watched_dirs(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_watched(&self, path: &Path) -> bool {
        self.stamps.contains_key(path)
    }

    /// Whether `path` passes the extension allow-list.
    pub fn accepts(&self, path: &Path) -> bool {
        manasx_analysis::scanner::has_allowed_extension(path, &self.options.extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> WalkOptions {
        WalkOptions {
            extensions: vec!["js".to_string()],
            ignored_dirs: vec!["node_modules".to_string()],
            max_files: None,
        }
    }

    #[test]
    fn detects_create_modify_remove() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        std::fs::write(&a, "const a = 1;").unwrap();
        std::fs::write(dir.path().join("notes.md"), "x").unwrap();

        let mut watcher = PollWatcher::new(dir.path(), options());
        assert_eq!(watcher.prime().unwrap(), 1);
        assert!(watcher.poll().is_empty());

        std::fs::write(&a, "const a = 22;").unwrap();
        std::fs::write(&b, "const b = 1;").unwrap();
        let events = watcher.poll();
        assert_eq!(
            events,
            vec![
                ChangeEvent::new(&a, ChangeKind::Modified),
                ChangeEvent::new(&b, ChangeKind::Created),
            ]
        );

        std::fs::remove_file(&a).unwrap();
        assert_eq!(watcher.poll(), vec![ChangeEvent::new(&a, ChangeKind::Removed)]);
        assert_eq!(watcher.watched_files(), 1);
    }

    #[test]
    fn rewrite_with_same_content_is_not_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.js");
        std::fs::write(&a, "const a = 1;").unwrap();
        let mut watcher = PollWatcher::new(dir.path(), options());
        watcher.prime().unwrap();
        std::fs::write(&a, "const a = 1;").unwrap();
        assert!(watcher.poll().is_empty());
    }

    #[test]
    fn excluded_subtree_leaves_same_named_dirs_watched() {
        let dir = tempfile::tempdir().unwrap();
        let ours = dir.path().join("logs");
        let theirs = dir.path().join("src").join("logs");
        std::fs::create_dir_all(&ours).unwrap();
        std::fs::create_dir_all(&theirs).unwrap();
        std::fs::write(ours.join("trace.js"), "x").unwrap();
        std::fs::write(theirs.join("logger.js"), "x").unwrap();

        let mut watcher = PollWatcher::new(dir.path(), options()).exclude(&ours);
        assert_eq!(watcher.prime().unwrap(), 1);
        assert!(watcher.is_watched(&theirs.join("logger.js")));

        std::fs::write(ours.join("more.js"), "y").unwrap();
        assert!(watcher.poll().is_empty());
    }

    #[test]
    fn missing_root_fails_to_prime() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = PollWatcher::new(dir.path().join("gone"), options());
        assert!(watcher.prime().is_err());
    }
}
