//! Cache manager for persisting lookup results to disk
//!
//! Provides a `CacheManager` that stores one JSON document per cache domain
//! (characters, planets, statistics) inside a single directory. Reads never
//! fail: a missing or unreadable file is treated as an empty cache.

use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// The three cache categories, each backed by its own file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Characters keyed by canonical name
    Characters,
    /// Planets keyed by planet id
    Planets,
    /// Hour-of-day search statistics
    Statistics,
}

impl Domain {
    /// All domains, in the order they are cleared
    pub const ALL: [Domain; 3] = [Domain::Planets, Domain::Characters, Domain::Statistics];

    /// File name of the JSON document backing this domain
    pub fn file_name(self) -> &'static str {
        match self {
            Domain::Characters => "cache_character.json",
            Domain::Planets => "cache_world.json",
            Domain::Statistics => "cache_stats.json",
        }
    }
}

/// Errors that can occur when writing or removing cache files
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache file could not be written
    #[error("Something went wrong on writing on file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file exists but could not be removed
    #[error("Something went wrong on removal of file {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache contents could not be serialized
    #[error("Failed to serialize cache contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Manages reading and writing cache documents to disk
///
/// Every save overwrites the whole document for its domain. There is no
/// locking, so two processes sharing a directory race and the last writer
/// wins.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheManager {
    /// Creates a CacheManager storing its files in the current working directory
    pub fn new() -> Self {
        Self::with_dir(".")
    }

    /// Creates a CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Directory holding the cache files
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to the file backing a domain
    pub fn path(&self, domain: Domain) -> PathBuf {
        self.cache_dir.join(domain.file_name())
    }

    /// Loads the document for a domain
    ///
    /// Returns `T::default()` (an empty mapping) when the file is missing or
    /// does not parse; the problem is logged and never surfaced.
    pub fn load<T: DeserializeOwned + Default>(&self, domain: Domain) -> T {
        let path = self.path(domain);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cache file unavailable, starting empty");
                return T::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cache file is not valid, starting empty");
                T::default()
            }
        }
    }

    /// Overwrites the document for a domain
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(CacheError)` if serialization, directory creation or writing fails
    pub fn save<T: Serialize>(&self, domain: Domain, data: &T) -> Result<(), CacheError> {
        let path = self.path(domain);
        let json = serde_json::to_string_pretty(data)?;

        let written = fs::create_dir_all(&self.cache_dir).and_then(|()| fs::write(&path, json));
        written.map_err(|source| CacheError::Write { path, source })?;

        debug!(file = domain.file_name(), "cache saved");
        Ok(())
    }

    /// Deletes the file backing a domain
    ///
    /// # Returns
    /// * `Ok(true)` if a file was removed
    /// * `Ok(false)` if there was nothing to remove
    /// * `Err(CacheError::Remove)` if the file exists but could not be deleted
    pub fn clear(&self, domain: Domain) -> Result<bool, CacheError> {
        let path = self.path(domain);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "cache file removed");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Remove { path, source }),
        }
    }

    /// Deletes the files of every domain
    ///
    /// A failure on one domain is logged and does not stop the others; the
    /// failures are returned so the caller can report them.
    pub fn clear_all(&self) -> Vec<CacheError> {
        Domain::ALL
            .into_iter()
            .filter_map(|domain| match self.clear(domain) {
                Ok(_) => None,
                Err(e) => {
                    warn!(error = %e, "failed to clear cache");
                    Some(e)
                }
            })
            .collect()
    }
}
