//! Cache module for storing API responses to disk
//!
//! This module provides a cache manager that persists one JSON document per
//! domain (characters, planets, statistics), and the ordered entry mapping
//! used for the character and planet documents.

mod entry;
mod manager;

pub use entry::{format_timestamp, CacheEntry, EntryMap};
pub use manager::{CacheError, CacheManager, Domain};
