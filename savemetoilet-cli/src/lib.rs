//! Command-line interface for searching nearby restrooms.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod search;

pub use error::CliError;

use search::{SearchArgs, run_search};

const ARG_LAT: &str = "lat";
const ARG_LNG: &str = "lng";
const ARG_URGENCY: &str = "urgency";
const ARG_RADIUS: &str = "radius";
const ARG_MAX_DISTANCE: &str = "max-distance";
const ARG_MIN_QUALITY: &str = "min-quality";
const ARG_ONLY_FREE: &str = "only-free";
const ARG_EXCLUDE_PUBLIC: &str = "exclude-public";
const ARG_EXCLUDE_COMMERCIAL: &str = "exclude-commercial";
const ARG_CATEGORY: &str = "category";
const ARG_SEOUL_API_KEY: &str = "seoul-api-key";
const ARG_SEOUL_BASE_URL: &str = "seoul-base-url";
const ARG_KAKAO_API_KEY: &str = "kakao-api-key";
const ARG_KAKAO_BASE_URL: &str = "kakao-base-url";
const ARG_PLACES_API_KEY: &str = "places-api-key";
const ARG_PLACES_BASE_URL: &str = "places-base-url";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_STATS: &str = "stats";
const ENV_LAT: &str = "SAVEMETOILET_CMDS_SEARCH_LAT";
const ENV_LNG: &str = "SAVEMETOILET_CMDS_SEARCH_LNG";
const ENV_SEOUL_API_KEY: &str = "SAVEMETOILET_CMDS_SEARCH_SEOUL_API_KEY";
const ENV_KAKAO_API_KEY: &str = "SAVEMETOILET_CMDS_SEARCH_KAKAO_API_KEY";
const ENV_PLACES_API_KEY: &str = "SAVEMETOILET_CMDS_SEARCH_PLACES_API_KEY";

/// Run the SaveMeToilet CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, when
/// no source is configured, or when output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Search(args) => run_search(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "savemetoilet",
    about = "Find the nearest usable restroom from public and commercial sources",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search public facilities and cafes around a location.
    Search(SearchArgs),
}

#[cfg(test)]
mod tests;
