//! Cache entries and the ordered mapping that holds them
//!
//! An entry is stored on disk as the JSON array
//! `[<raw API object>, "<fetch time>", <times searched>]`.

use chrono::{DateTime, Local};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Format of the fetch timestamp kept with each entry
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Formats a local time the way entries record their fetch time
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// A cached API result plus its fetch time and search counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEntry", into = "RawEntry")]
pub struct CacheEntry {
    /// Raw `result` object returned by the API
    pub data: Value,
    /// When the data was fetched, local time
    pub cached_at: String,
    /// How many times this entry was searched (at least 1)
    pub times_searched: u64,
}

/// On-disk array form of a cache entry
#[derive(Serialize, Deserialize)]
struct RawEntry(Value, String, u64);

impl From<RawEntry> for CacheEntry {
    fn from(RawEntry(data, cached_at, times_searched): RawEntry) -> Self {
        Self {
            data,
            cached_at,
            times_searched,
        }
    }
}

impl From<CacheEntry> for RawEntry {
    fn from(entry: CacheEntry) -> Self {
        RawEntry(entry.data, entry.cached_at, entry.times_searched)
    }
}

impl CacheEntry {
    /// Creates an entry for freshly fetched data, searched once
    pub fn new(data: Value, cached_at: String) -> Self {
        Self {
            data,
            cached_at,
            times_searched: 1,
        }
    }

    /// Counts one more search served from the cache
    pub fn record_hit(&mut self) {
        self.times_searched += 1;
    }

    /// Deserializes the `properties` member of the raw object
    pub fn properties<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let properties = self.data.get("properties").unwrap_or(&Value::Null);
        T::deserialize(properties)
    }

    /// The `properties.name` string of the raw object, if present
    pub fn name(&self) -> Option<&str> {
        self.data.pointer("/properties/name").and_then(Value::as_str)
    }
}

/// Flat key to entry mapping that keeps insertion order
///
/// The order entries were first inserted is the order they are iterated,
/// serialized and read back, so "first match" lookups stay stable across
/// runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryMap {
    entries: Vec<(String, CacheEntry)>,
}

impl EntryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CacheEntry> {
        let i = self.position(key)?;
        Some(&mut self.entries[i].1)
    }

    /// Inserts an entry, replacing an existing one in place
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, key: String, entry: CacheEntry) -> Option<CacheEntry> {
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, entry)),
            None => {
                self.entries.push((key, entry));
                None
            }
        }
    }

    /// Stores freshly fetched data under `key`
    ///
    /// A new key starts with a count of 1. An existing key gets the new data
    /// and fetch time and its count is incremented. Returns the stored entry.
    pub fn record_fetch(&mut self, key: String, data: Value, cached_at: String) -> &CacheEntry {
        let i = match self.position(&key) {
            Some(i) => {
                let entry = &mut self.entries[i].1;
                entry.data = data;
                entry.cached_at = cached_at;
                entry.record_hit();
                i
            }
            None => {
                self.entries.push((key, CacheEntry::new(data, cached_at)));
                self.entries.len() - 1
            }
        };
        &self.entries[i].1
    }

    /// Finds the first key containing `needle`, ignoring case
    ///
    /// Case is compared through `to_lowercase`, which is not full Unicode
    /// case folding: `ß` does not match `ss`.
    pub fn find_containing_mut(&mut self, needle: &str) -> Option<(&str, &mut CacheEntry)> {
        let needle = needle.to_lowercase();
        self.entries
            .iter_mut()
            .find(|(key, _)| key.to_lowercase().contains(&needle))
            .map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl Serialize for EntryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

struct EntryMapVisitor;

impl<'de> Visitor<'de> for EntryMapVisitor {
    type Value = EntryMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of cache entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<EntryMap, A::Error> {
        let mut map = EntryMap::new();
        while let Some((key, entry)) = access.next_entry::<String, CacheEntry>()? {
            map.insert(key, entry);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for EntryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntryMapVisitor)
    }
}
