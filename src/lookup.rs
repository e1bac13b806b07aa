//! Cached character and planet lookups
//!
//! The `LookupService` answers from the local cache when it can and falls
//! back to the API otherwise. Every successful lookup bumps the entry's
//! search counter and saves the cache before returning.

use chrono::Local;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{format_timestamp, CacheEntry, CacheManager, Domain, EntryMap};
use crate::data::{ApiError, CharacterProfile, PlanetProfile, StarWarsApi};
use crate::stats;

/// Where a found entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Served from the local cache
    Cache,
    /// Fetched from the API during this lookup
    Remote,
}

/// An entry returned by a successful lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    /// Key the entry is stored under (canonical name or planet id)
    pub key: String,
    /// The entry as saved, counter already updated
    pub entry: CacheEntry,
    pub source: Source,
}

impl Found {
    pub fn character(&self) -> CharacterProfile {
        self.entry.properties().unwrap_or_default()
    }

    pub fn planet(&self) -> PlanetProfile {
        self.entry.properties().unwrap_or_default()
    }
}

/// Result of a lookup
#[derive(Debug)]
pub enum LookupOutcome {
    Found(Found),
    /// Nothing matched, in the cache or remotely
    NotFound,
    /// The API could not be queried
    ApiError(ApiError),
}

impl LookupOutcome {
    pub fn found(&self) -> Option<&Found> {
        match self {
            LookupOutcome::Found(found) => Some(found),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.found().is_some()
    }
}

/// Outcome of a full `search` operation
#[derive(Debug)]
pub struct SearchReport {
    pub character: LookupOutcome,
    /// Homeworld lookup, present only when it was requested and the
    /// character was found
    pub homeworld: Option<LookupOutcome>,
}

impl SearchReport {
    /// Whether every lookup that ran found its entry
    pub fn succeeded(&self) -> bool {
        self.character.is_found() && self.homeworld.as_ref().map_or(true, LookupOutcome::is_found)
    }
}

/// Looks up characters and planets through the cache
pub struct LookupService<'a, A> {
    cache: &'a CacheManager,
    api: A,
}

impl<'a, A: StarWarsApi> LookupService<'a, A> {
    pub fn new(cache: &'a CacheManager, api: A) -> Self {
        Self { cache, api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Runs a search: the character, optionally its homeworld, then records
    /// the search in the statistics
    pub async fn search(&self, name: &str, with_homeworld: bool) -> SearchReport {
        let character = self.find_character(name).await;

        let homeworld = match character.found() {
            Some(found) if with_homeworld => Some(match found.character().homeworld_id() {
                Some(id) => self.find_planet(id).await,
                None => {
                    warn!(character = %found.key, "character has no homeworld reference");
                    LookupOutcome::NotFound
                }
            }),
            _ => None,
        };

        stats::record_search(self.cache, Local::now());

        SearchReport {
            character,
            homeworld,
        }
    }

    /// Finds a character by (partial) name
    ///
    /// The first cached name containing `name`, ignoring case, is a hit and
    /// no request is made. Otherwise the API is searched and its first
    /// result is cached under the name the API reports.
    pub async fn find_character(&self, name: &str) -> LookupOutcome {
        let mut characters: EntryMap = self.cache.load(Domain::Characters);

        if let Some((key, entry)) = characters.find_containing_mut(name) {
            entry.record_hit();
            debug!(query = name, key, count = entry.times_searched, "character cache hit");
            let found = Found {
                key: key.to_string(),
                entry: entry.clone(),
                source: Source::Cache,
            };
            self.persist(Domain::Characters, &characters);
            return LookupOutcome::Found(found);
        }

        let results = match self.api.search_people(name).await {
            Ok(results) => results,
            Err(e) => {
                warn!(query = name, error = %e, "character search failed");
                return LookupOutcome::ApiError(e);
            }
        };

        let Some(first) = results.into_iter().next() else {
            info!(query = name, "no character matched");
            return LookupOutcome::NotFound;
        };

        let Some(key) = first
            .pointer("/properties/name")
            .and_then(Value::as_str)
            .map(str::to_string)
        else {
            return LookupOutcome::ApiError(ApiError::MissingField("properties.name".to_string()));
        };

        self.store_fetched(&mut characters, Domain::Characters, key, first)
    }

    /// Finds a planet by exact id
    pub async fn find_planet(&self, id: &str) -> LookupOutcome {
        let mut planets: EntryMap = self.cache.load(Domain::Planets);

        if let Some(entry) = planets.get_mut(id) {
            entry.record_hit();
            debug!(id, count = entry.times_searched, "planet cache hit");
            let found = Found {
                key: id.to_string(),
                entry: entry.clone(),
                source: Source::Cache,
            };
            self.persist(Domain::Planets, &planets);
            return LookupOutcome::Found(found);
        }

        match self.api.get_planet(id).await {
            Ok(Some(data)) => self.store_fetched(&mut planets, Domain::Planets, id.to_string(), data),
            Ok(None) => {
                info!(id, "no planet with this id");
                LookupOutcome::NotFound
            }
            Err(e) => {
                warn!(id, error = %e, "planet fetch failed");
                LookupOutcome::ApiError(e)
            }
        }
    }

    /// Caches fetched data under `key`, saves, and returns it as found
    fn store_fetched(&self, map: &mut EntryMap, domain: Domain, key: String, data: Value) -> LookupOutcome {
        let entry = map
            .record_fetch(key.clone(), data, format_timestamp(Local::now()))
            .clone();
        debug!(key = %key, count = entry.times_searched, "cached fetched entry");
        self.persist(domain, map);

        LookupOutcome::Found(Found {
            key,
            entry,
            source: Source::Remote,
        })
    }

    fn persist(&self, domain: Domain, map: &EntryMap) {
        if let Err(e) = self.cache.save(domain, map) {
            warn!(error = %e, "failed to save cache");
        }
    }
}
