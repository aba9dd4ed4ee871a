//! Ordered frequency counter.
//!
//! Keys keep first-seen order so that ties in [`Tally::mode`] are broken
//! deterministically, and a serialized tally reloads with the same order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::collections::FxHashMap;

/// Counts occurrences of string labels in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: FxHashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment `key` by one.
    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    /// Increment `key` by `n`. A zero `n` still records the key's position.
    pub fn add_n(&mut self, key: &str, n: usize) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += n,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), n));
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The label with the highest count. Ties go to the first-seen label.
    pub fn mode(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.entries {
            if entry.1 == 0 {
                continue;
            }
            match best {
                Some(b) if b.1 >= entry.1 => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(k, _)| k.as_str())
    }

    /// Up to `n` labels by descending count, first-seen order among equals.
    pub fn top(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<&(String, usize)> = self.entries.iter().filter(|e| e.1 > 0).collect();
        // sort_by is stable, so equal counts keep insertion order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).map(|(k, _)| k.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// Fold another tally in, appending keys this one has not seen yet.
    pub fn merge(&mut self, other: &Tally) {
        for (key, n) in other.iter() {
            self.add_n(key, n);
        }
    }
}

impl PartialEq for Tally {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Tally {}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, n) in &self.entries {
            map.serialize_entry(key, n)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Tally {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TallyVisitor;

        impl<'de> Visitor<'de> for TallyVisitor {
            type Value = Tally;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of label to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Tally, A::Error> {
                let mut tally = Tally::new();
                while let Some((key, n)) = access.next_entry::<String, usize>()? {
                    tally.add_n(&key, n);
                }
                Ok(tally)
            }
        }

        deserializer.deserialize_map(TallyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_prefers_first_seen_on_tie() {
        let mut t = Tally::new();
        t.add("snake_case");
        t.add("camelCase");
        t.add("camelCase");
        t.add("snake_case");
        assert_eq!(t.mode(), Some("snake_case"));
        assert_eq!(t.total(), 4);
    }

    #[test]
    fn top_is_stable_among_equal_counts() {
        let mut t = Tally::new();
        for key in ["b", "a", "c", "a"] {
            t.add(key);
        }
        assert_eq!(t.top(2), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn serialized_order_survives_reload() {
        let mut t = Tally::new();
        t.add_n("zeta", 3);
        t.add_n("alpha", 3);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"zeta":3,"alpha":3}"#);
        let back: Tally = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode(), Some("zeta"));
        assert_eq!(back, t);
    }
}
