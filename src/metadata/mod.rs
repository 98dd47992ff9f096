#![doc = r#"
Key/value metadata gathered while walking a container

# Overview

Every extractor returns its own [`MetadataMap`] and the walker merges them in the
order the chunks appear. A key inserted twice keeps the last value it was given,
but keeps the slot of its first insertion, so iteration order reflects discovery.

Keys produced by the embedded MIDI chunk are reserved (see the constants in this
module). Free-form keys from `info` and vendor `uuid` chunks live alongside them.
"#]

mod musical;
pub use musical::*;

use std::collections::HashMap;

/// Standard base64 of the whole embedded MIDI payload
pub const MIDI_DATA_BASE64: &str = "midiDataBase64";
/// First tempo, in beats per minute
pub const TEMPO: &str = "tempo";
/// Every tempo change as `bpm,ticks;`
pub const TEMPO_SEQUENCE: &str = "tempo sequence";
/// First time signature, as `n/d`
pub const TIME_SIGNATURE: &str = "time signature";
/// Every time signature change as `n/d,ticks;`
pub const TIME_SIGNATURE_SEQUENCE: &str = "time signature sequence";
/// First key signature, e.g. `C#m`
pub const KEY_SIGNATURE: &str = "key signature";
/// Every key signature change as `key,ticks;`
pub const KEY_SIGNATURE_SEQUENCE: &str = "key signature sequence";

/// Ordered string map with last-writer-wins insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")
)]
pub struct MetadataMap {
    entries: Vec<(String, String)>,
    // key -> slot in `entries`
    index: HashMap<String, usize>,
}

impl MetadataMap {
    /// An empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a key. Keys are case-sensitive.
    pub fn get(&self, key: &str) -> Option<&str> {
        let slot = *self.index.get(key)?;
        self.entries.get(slot).map(|(_, v)| v.as_str())
    }

    /// True if the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Union with `other`. Values from `other` win on conflicts.
    pub fn merge(&mut self, other: MetadataMap) {
        self.entries.reserve(other.len());
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Iterate entries in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl From<Vec<(String, String)>> for MetadataMap {
    fn from(entries: Vec<(String, String)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<MetadataMap> for Vec<(String, String)> {
    fn from(map: MetadataMap) -> Self {
        map.entries
    }
}

impl IntoIterator for MetadataMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[test]
fn insert_overwrites_in_place() {
    let mut map = MetadataMap::new();
    assert_eq!(map.insert("title", "One"), None);
    map.insert("artist", "Someone");
    assert_eq!(map.insert("title", "Two"), Some("One".to_owned()));

    let entries: Vec<_> = map.iter().collect();
    assert_eq!(entries, vec![("title", "Two"), ("artist", "Someone")]);
}

#[test]
fn keys_are_case_sensitive() {
    let map: MetadataMap = [("Tempo", "90"), ("tempo", "120")].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("tempo"), Some("120"));
    assert_eq!(map.get("TEMPO"), None);
}

#[test]
fn merge_is_last_write_wins() {
    let mut first: MetadataMap = [("a", "1"), ("b", "2")].into_iter().collect();
    let second: MetadataMap = [("b", "3"), ("c", "4")].into_iter().collect();
    first.merge(second);

    let entries: Vec<_> = first.iter().collect();
    assert_eq!(entries, vec![("a", "1"), ("b", "3"), ("c", "4")]);
}

#[test]
fn many_unique_keys() {
    let map: MetadataMap = (0..200_000).map(|n| (format!("key {n}"), n.to_string())).collect();
    assert_eq!(map.len(), 200_000);
    assert_eq!(map.get("key 0"), Some("0"));
    assert_eq!(map.get("key 199999"), Some("199999"));
    assert_eq!(map.iter().nth(1234), Some(("key 1234", "1234")));

    let mut merged = map.clone();
    merged.merge(map);
    assert_eq!(merged.len(), 200_000);
}

#[test]
fn lookups_after_conversion() {
    let entries = vec![("a".to_owned(), "1".to_owned()), ("a".to_owned(), "2".to_owned())];
    let map = MetadataMap::from(entries);
    assert_eq!(map.get("a"), Some("2"));
    assert_eq!(Vec::from(map), vec![("a".to_owned(), "2".to_owned())]);
}
