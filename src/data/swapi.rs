//! Star Wars API (swapi.tech) client
//!
//! This module fetches people and planets from swapi.tech. The client sits
//! behind the `StarWarsApi` trait so lookups can run against a fake API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Base URL for the swapi.tech API
pub const SWAPI_BASE_URL: &str = "https://www.swapi.tech/api";

/// Default timeout for a single API request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with something other than 200 OK
    #[error("API responded with status {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The response parsed but lacks a field the lookup needs
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// Remote source of character and planet data
#[async_trait]
pub trait StarWarsApi: Send + Sync {
    /// Searches people by name, returning the raw `result` objects
    async fn search_people(&self, name: &str) -> Result<Vec<Value>, ApiError>;

    /// Fetches a planet by id, returning its raw `result` object
    ///
    /// Returns `Ok(None)` when the API reports no such planet.
    async fn get_planet(&self, id: &str) -> Result<Option<Value>, ApiError>;
}

/// Envelope of a people search response
#[derive(Debug, Deserialize)]
struct PeopleSearchResponse {
    #[serde(default)]
    result: Vec<Value>,
}

/// Envelope of a single planet response
#[derive(Debug, Deserialize)]
struct PlanetResponse {
    result: Value,
}

/// Client for the swapi.tech REST API
#[derive(Debug, Clone)]
pub struct SwapiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API, without a trailing slash
    base_url: String,
}

impl SwapiClient {
    /// Creates a client for the public API with the default timeout
    pub fn new() -> Result<Self, ApiError> {
        Self::with_settings(SWAPI_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom base URL and request timeout
    pub fn with_settings(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// URL of the people search endpoint (the name goes in the query string)
    fn people_search_url(&self) -> String {
        format!("{}/people/", self.base_url)
    }

    /// URL of a single planet
    fn planet_url(&self, id: &str) -> String {
        format!("{}/planets/{}", self.base_url, id)
    }
}

#[async_trait]
impl StarWarsApi for SwapiClient {
    async fn search_people(&self, name: &str) -> Result<Vec<Value>, ApiError> {
        let url = self.people_search_url();
        debug!(%url, name, "searching people");

        let response = self
            .http_client
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        parse_people_search(&text)
    }

    async fn get_planet(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let url = self.planet_url(id);
        debug!(%url, "fetching planet");

        let response = self.http_client.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let text = response.text().await?;
                parse_planet(&text).map(Some)
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(ApiError::Status(status.as_u16())),
        }
    }
}

/// Parses a people search body into its result objects
fn parse_people_search(text: &str) -> Result<Vec<Value>, ApiError> {
    let response: PeopleSearchResponse = serde_json::from_str(text)?;
    Ok(response.result)
}

/// Parses a planet body into its result object
fn parse_planet(text: &str) -> Result<Value, ApiError> {
    let response: PlanetResponse = serde_json::from_str(text)?;
    Ok(response.result)
}
