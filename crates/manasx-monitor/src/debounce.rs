//! Per-path debounce timers as plain deadlines.
//!
//! No timers are spawned: the coordinator asks for `next_deadline()`,
//! sleeps until then, and drains `due(now)`. Tests drive it with
//! fabricated instants.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadlines: FxHashMap<PathBuf, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadlines: FxHashMap::default(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Reset `path`'s timer to `now + window`. Returns true when the path
    /// had no pending timer.
    pub fn touch(&mut self, path: &Path, now: Instant) -> bool {
        self.deadlines
            .insert(path.to_path_buf(), now + self.window)
            .is_none()
    }

    /// Remove and return every path whose timer has expired, in path order.
    pub fn due(&mut self, now: Instant) -> Vec<PathBuf> {
        let mut ready: Vec<PathBuf> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(path, _)| path.clone())
            .collect();
        ready.sort();
        for path in &ready {
            self.deadlines.remove(path);
        }
        ready
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    pub fn cancel(&mut self, path: &Path) -> bool {
        self.deadlines.remove(path).is_some()
    }

    /// Drop every pending timer; returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.deadlines.len();
        self.deadlines.clear();
        n
    }

    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_pending(&self, path: &Path) -> bool {
        self.deadlines.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(1000);

    #[test]
    fn burst_collapses_to_one() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        let path = Path::new("src/a.js");
        assert!(d.touch(path, t0));
        for i in 1..10 {
            assert!(!d.touch(path, t0 + Duration::from_millis(100 * i)));
        }
        // Last touch at 900ms: nothing due until 1900ms.
        assert!(d.due(t0 + Duration::from_millis(1899)).is_empty());
        assert_eq!(d.due(t0 + Duration::from_millis(1900)), vec![PathBuf::from("src/a.js")]);
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn spaced_events_each_fire() {
        let mut d = Debouncer::new(WINDOW);
        let path = Path::new("src/a.js");
        let mut fired = 0;
        let mut now = Instant::now();
        for _ in 0..4 {
            d.touch(path, now);
            now += Duration::from_millis(1500);
            fired += d.due(now).len();
        }
        assert_eq!(fired, 4);
    }

    #[test]
    fn next_deadline_and_cancel() {
        let mut d = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        d.touch(Path::new("b.js"), t0 + Duration::from_millis(50));
        d.touch(Path::new("a.js"), t0);
        assert_eq!(d.next_deadline(), Some(t0 + WINDOW));
        assert!(d.cancel(Path::new("a.js")));
        assert_eq!(d.next_deadline(), Some(t0 + Duration::from_millis(1050)));
        assert_eq!(d.cancel_all(), 1);
        assert!(d.next_deadline().is_none());
    }
}
