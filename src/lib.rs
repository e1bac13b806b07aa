//! Holocron Library
//!
//! Star Wars character and planet lookups from swapi.tech with a local JSON
//! cache and usage statistics. The binary in `main.rs` is a thin wrapper.

pub mod cache;
pub mod cli;
pub mod data;
pub mod display;
pub mod lookup;
pub mod stats;
