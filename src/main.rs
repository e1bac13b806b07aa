//! Holocron - Star Wars character lookups with a local cache
//!
//! Searches characters (and their homeworlds) on swapi.tech, caches the
//! results as JSON files and reports how the tool has been used.

use clap::Parser;
use tracing::{warn, Level};
use tracing_subscriber::EnvFilter;

use holocron::cache::CacheManager;
use holocron::cli::{Cli, Command, Config};
use holocron::data::SwapiClient;
use holocron::display;
use holocron::lookup::LookupService;
use holocron::stats::StatisticsReport;

/// Sets up logging to stderr, keeping stdout for the report
fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "invalid arguments");
            println!("{}", display::UNSUPPORTED_OPERATION);
            return Ok(());
        }
    };

    let cache = CacheManager::with_dir(&config.cache_dir);

    match config.command {
        Command::Search {
            name,
            with_homeworld,
        } => {
            let api = SwapiClient::with_settings(config.api_url.as_str(), config.timeout)?;
            let service = LookupService::new(&cache, api);
            let report = service.search(&name, with_homeworld).await;
            print!("{}", display::render_search(&report));
        }
        Command::CleanCache => {
            for e in cache.clear_all() {
                println!("{}", e);
            }
        }
        Command::Statistics => match StatisticsReport::load(&cache) {
            Some(report) => print!("{}", display::render_statistics(&report)),
            None => println!("{}", display::NO_STATS),
        },
    }

    Ok(())
}
