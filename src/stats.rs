//! Usage statistics for Holocron
//!
//! Every search appends the hour of day it ran at to the statistics
//! document. The report combines those hours with the per-entry search
//! counters of the character and planet caches.

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::cache::{CacheManager, Domain, EntryMap};

/// Persisted statistics record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Two-digit hours ("00".."23"), one per search, sorted ascending
    #[serde(default)]
    pub hours: Vec<String>,
}

impl SearchStats {
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Number of searches recorded
    pub fn total_searches(&self) -> usize {
        self.hours.len()
    }

    /// Appends the hour of a search, keeping the list sorted
    pub fn record_hour(&mut self, hour: u32) {
        self.hours.push(format!("{:02}", hour));
        self.hours.sort();
    }
}

/// Records one search at the given time in the statistics document
///
/// A failed save is logged and otherwise ignored.
pub fn record_search(cache: &CacheManager, at: DateTime<Local>) -> SearchStats {
    let mut stats: SearchStats = cache.load(Domain::Statistics);
    stats.record_hour(at.hour());

    if let Err(e) = cache.save(Domain::Statistics, &stats) {
        warn!(error = %e, "failed to save search statistics");
    }
    stats
}

/// Searches made during one hour of the day
#[derive(Debug, Clone, PartialEq)]
pub struct HourFrequency {
    pub hour: String,
    pub count: usize,
    /// Share of all recorded searches, 0-100
    pub percentage: f64,
}

/// Total searches for one cached character or planet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCount {
    pub label: String,
    pub count: u64,
}

/// Aggregated usage statistics
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    /// Hour buckets in ascending hour order
    pub hours: Vec<HourFrequency>,
    /// Characters in cache order
    pub characters: Vec<SearchCount>,
    /// Planets in cache order, labelled by planet name
    pub planets: Vec<SearchCount>,
    /// Sum of all character search counters
    pub successful_searches: u64,
    /// Number of recorded searches
    pub total_searches: usize,
}

impl StatisticsReport {
    /// Builds the report from the cache directory
    ///
    /// Returns `None` when no search was ever recorded; the character and
    /// planet caches are not read in that case.
    pub fn load(cache: &CacheManager) -> Option<Self> {
        let stats: SearchStats = cache.load(Domain::Statistics);
        if stats.is_empty() {
            return None;
        }

        let characters: EntryMap = cache.load(Domain::Characters);
        let planets: EntryMap = cache.load(Domain::Planets);
        Self::build(&stats, &characters, &planets)
    }

    /// Builds the report from already loaded documents
    pub fn build(stats: &SearchStats, characters: &EntryMap, planets: &EntryMap) -> Option<Self> {
        if stats.is_empty() {
            return None;
        }
        let total_searches = stats.total_searches();

        let mut buckets: BTreeMap<&str, usize> = BTreeMap::new();
        for hour in &stats.hours {
            *buckets.entry(hour.as_str()).or_default() += 1;
        }
        let hours = buckets
            .into_iter()
            .map(|(hour, count)| HourFrequency {
                hour: hour.to_string(),
                count,
                percentage: count as f64 / total_searches as f64 * 100.0,
            })
            .collect();

        let characters: Vec<SearchCount> = characters
            .iter()
            .map(|(name, entry)| SearchCount {
                label: name.to_string(),
                count: entry.times_searched,
            })
            .collect();

        let planets = planets
            .iter()
            .map(|(id, entry)| SearchCount {
                label: entry.name().unwrap_or(id).to_string(),
                count: entry.times_searched,
            })
            .collect();

        let successful_searches = characters.iter().map(|c| c.count).sum();

        Some(Self {
            hours,
            characters,
            planets,
            successful_searches,
            total_searches,
        })
    }

    /// Successful character searches over all recorded searches
    pub fn success_ratio(&self) -> f64 {
        self.successful_searches as f64 / self.total_searches as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn stats(hours: &[&str]) -> SearchStats {
        SearchStats {
            hours: hours.iter().map(|h| h.to_string()).collect(),
        }
    }

    fn cached(name: &str, times_searched: u64) -> CacheEntry {
        CacheEntry {
            data: json!({ "properties": { "name": name } }),
            cached_at: "2024-05-04 12:00:00.000000".to_string(),
            times_searched,
        }
    }

    #[test]
    fn test_record_hour_keeps_sorted_two_digit_hours() {
        let mut stats = SearchStats::default();
        stats.record_hour(14);
        stats.record_hour(9);
        stats.record_hour(0);

        assert_eq!(stats.hours, vec!["00", "09", "14"]);
    }

    #[test]
    fn test_record_search_persists_hour() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::with_dir(temp_dir.path());
        let at = Local.with_ymd_and_hms(2024, 5, 4, 21, 5, 0).unwrap();

        record_search(&cache, at);
        record_search(&cache, at);

        let stored: SearchStats = cache.load(Domain::Statistics);
        assert_eq!(stored.hours, vec!["21", "21"]);
    }

    #[test]
    fn test_empty_stats_yield_no_report() {
        let report = StatisticsReport::build(&SearchStats::default(), &EntryMap::new(), &EntryMap::new());
        assert!(report.is_none());
    }

    #[test]
    fn test_load_on_empty_directory_yields_no_report() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::with_dir(temp_dir.path());

        assert!(StatisticsReport::load(&cache).is_none());
    }

    #[test]
    fn test_legacy_empty_object_is_empty_stats() {
        let parsed: SearchStats = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_hour_percentages_sum_to_hundred() {
        let samples: [&[&str]; 4] = [
            &["10"],
            &["09", "09", "10"],
            &["01", "02", "03", "04", "05", "06", "07"],
            &["13", "13", "13", "17", "22", "22"],
        ];

        for hours in samples {
            let report = StatisticsReport::build(&stats(hours), &EntryMap::new(), &EntryMap::new())
                .expect("non-empty stats should report");
            let total: f64 = report.hours.iter().map(|h| h.percentage).sum();
            assert!((total - 100.0).abs() < 1e-9, "{:?} summed to {}", hours, total);
        }
    }

    #[test]
    fn test_hour_buckets_count_and_order() {
        let report =
            StatisticsReport::build(&stats(&["09", "09", "14", "23"]), &EntryMap::new(), &EntryMap::new())
                .unwrap();

        let buckets: Vec<(&str, usize)> = report
            .hours
            .iter()
            .map(|h| (h.hour.as_str(), h.count))
            .collect();
        assert_eq!(buckets, vec![("09", 2), ("14", 1), ("23", 1)]);
        assert!((report.hours[0].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_character_and_planet_counts() {
        let mut characters = EntryMap::new();
        characters.insert("Luke Skywalker".to_string(), cached("Luke Skywalker", 3));
        characters.insert("Leia Organa".to_string(), cached("Leia Organa", 1));
        let mut planets = EntryMap::new();
        planets.insert("1".to_string(), cached("Tatooine", 2));
        planets.insert(
            "99".to_string(),
            CacheEntry::new(json!({}), "2024-05-04 12:00:00.000000".to_string()),
        );

        let report =
            StatisticsReport::build(&stats(&["10", "10", "11", "12", "12"]), &characters, &planets)
                .unwrap();

        assert_eq!(
            report.characters,
            vec![
                SearchCount { label: "Luke Skywalker".to_string(), count: 3 },
                SearchCount { label: "Leia Organa".to_string(), count: 1 },
            ]
        );
        assert_eq!(report.planets[0].label, "Tatooine");
        assert_eq!(report.planets[0].count, 2);
        assert_eq!(report.planets[1].label, "99", "nameless planet falls back to its id");
        assert_eq!(report.successful_searches, 4);
        assert_eq!(report.total_searches, 5);
        assert!((report.success_ratio() - 0.8).abs() < 1e-9);
    }
}
