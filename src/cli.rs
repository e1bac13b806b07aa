//! Command-line interface parsing for Holocron
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into the runtime `Config`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::data::swapi::SWAPI_BASE_URL;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// `search` was requested without a name
    #[error("The search operation needs a non-empty --name")]
    MissingName,
}

/// Operations the tool can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// Look up a character by name
    Search,
    /// Delete all cache files
    #[value(name = "clean_cache")]
    CleanCache,
    /// Print usage statistics
    Statistics,
}

/// Holocron - Star Wars character lookups backed by swapi.tech
#[derive(Parser, Debug)]
#[command(name = "holocron")]
#[command(about = "Displays Star Wars characters' info using The Star Wars API (swapi.tech)")]
#[command(version)]
pub struct Cli {
    /// Operation to perform
    #[arg(value_enum)]
    pub operation: Operation,

    /// Character's name (or part of it) to search for
    #[arg(long)]
    pub name: Option<String>,

    /// Also display the character's homeworld
    #[arg(long)]
    pub world: bool,

    /// Directory holding the cache files
    #[arg(long, env = "HOLOCRON_CACHE_DIR", default_value = ".")]
    pub cache_dir: PathBuf,

    /// Base URL of the Star Wars API
    #[arg(long, env = "HOLOCRON_API_URL", default_value = SWAPI_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// What to run, with its operation-specific arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { name: String, with_homeworld: bool },
    CleanCache,
    Statistics,
}

/// Runtime configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub cache_dir: PathBuf,
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with the command to run
    /// * `Err(CliError::MissingName)` for a search without a usable name
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let command = match cli.operation {
            Operation::Search => {
                let name = cli
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or(CliError::MissingName)?;
                Command::Search {
                    name: name.to_string(),
                    with_homeworld: cli.world,
                }
            }
            Operation::CleanCache => Command::CleanCache,
            Operation::Statistics => Command::Statistics,
        };

        Ok(Config {
            command,
            cache_dir: cli.cache_dir.clone(),
            api_url: cli.api_url.clone(),
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}
