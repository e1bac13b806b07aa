//! Core data models for Holocron
//!
//! Typed views over the `properties` object of cached character and planet
//! entries, and the Earth comparison derived from a planet's periods.

pub mod swapi;

pub use swapi::{ApiError, StarWarsApi, SwapiClient};

use serde::Deserialize;

/// Earth's rotation period in hours
pub const EARTH_ROTATION_PERIOD: u64 = 24;

/// Earth's orbital period in days
pub const EARTH_ORBITAL_PERIOD: u64 = 365;

/// Character fields shown by a search
///
/// SWAPI reports every measurement as a string, often `"unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CharacterProfile {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub birth_year: String,
    /// URL of the character's homeworld planet
    pub homeworld: String,
}

impl CharacterProfile {
    /// Planet id of the homeworld, the last segment of its URL
    pub fn homeworld_id(&self) -> Option<&str> {
        self.homeworld
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
    }
}

/// Planet fields shown for a homeworld
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlanetProfile {
    pub name: String,
    pub population: String,
    /// Hours per local day
    pub rotation_period: String,
    /// Local days per year
    pub orbital_period: String,
}

impl PlanetProfile {
    /// Compares the planet's day and year to Earth's
    ///
    /// Only available when both periods are plain non-negative integers.
    pub fn earth_comparison(&self) -> Option<EarthComparison> {
        EarthComparison::from_periods(&self.rotation_period, &self.orbital_period)
    }
}

/// A planet's day and year expressed in Earth days and years
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthComparison {
    /// Planet rotation period divided by Earth's
    pub day_ratio: f64,
    /// Planet orbital period divided by Earth's
    pub year_ratio: f64,
}

impl EarthComparison {
    /// Builds the comparison from raw period strings
    ///
    /// Returns `None` unless both strings consist only of ASCII digits.
    pub fn from_periods(rotation_period: &str, orbital_period: &str) -> Option<Self> {
        let rotation = parse_period(rotation_period)?;
        let orbital = parse_period(orbital_period)?;

        Some(Self {
            day_ratio: rotation as f64 / EARTH_ROTATION_PERIOD as f64,
            year_ratio: orbital as f64 / EARTH_ORBITAL_PERIOD as f64,
        })
    }
}

/// Parses a period made only of ASCII digits
fn parse_period(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
