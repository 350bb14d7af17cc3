//! Search command implementation for the SaveMeToilet CLI.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use savemetoilet_core::{
    ResultEnvelope, SearchEngine, SearchFilters, SearchOutcome, SearchQuery, SearchStats,
    SourceAdapter, UrgencyLevel, VenueCategory,
};
use savemetoilet_data::{
    HttpSourceConfig, KakaoDirectoryAdapter, PlacesDirectoryAdapter, SeoulRegistryAdapter, kakao,
    places, seoul,
};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CATEGORY, ARG_EXCLUDE_COMMERCIAL, ARG_EXCLUDE_PUBLIC, ARG_KAKAO_API_KEY,
    ARG_KAKAO_BASE_URL, ARG_LAT, ARG_LNG, ARG_MAX_DISTANCE, ARG_MIN_QUALITY, ARG_ONLY_FREE,
    ARG_PLACES_API_KEY, ARG_PLACES_BASE_URL, ARG_RADIUS, ARG_SEOUL_API_KEY, ARG_SEOUL_BASE_URL,
    ARG_STATS, ARG_TIMEOUT_SECS, ARG_URGENCY, CliError, ENV_KAKAO_API_KEY, ENV_LAT, ENV_LNG,
    ENV_PLACES_API_KEY, ENV_SEOUL_API_KEY,
};

const SEOUL_ADAPTER: &str = "seoul-registry";
const KAKAO_ADAPTER: &str = "kakao-directory";
const PLACES_ADAPTER: &str = "places-directory";

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search the public-toilet registry and commercial venue \
                 directory around a location, then rank the merged results \
                 for the chosen urgency. API keys and endpoints can come from \
                 CLI flags, configuration files, or environment variables.",
    about = "Find restrooms near a location"
)]
#[ortho_config(prefix = "SAVEMETOILET")]
pub(crate) struct SearchArgs {
    /// Latitude of the search origin (WGS84).
    #[arg(long = ARG_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search origin (WGS84).
    #[arg(long = ARG_LNG, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Urgency profile (emergency, moderate or relaxed); unknown keys mean moderate.
    #[arg(long = ARG_URGENCY, value_name = "level")]
    #[serde(default)]
    pub(crate) urgency: Option<String>,
    /// Source search radius in metres; defaults to the profile radius.
    #[arg(long = ARG_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Drop results further away than this many metres.
    #[arg(long = ARG_MAX_DISTANCE, value_name = "metres")]
    #[serde(default)]
    pub(crate) max_distance: Option<f64>,
    /// Drop results whose quality score is below this value.
    #[arg(long = ARG_MIN_QUALITY, value_name = "score")]
    #[serde(default)]
    pub(crate) min_quality: Option<u8>,
    /// Keep only restrooms that need no purchase.
    #[arg(long = ARG_ONLY_FREE, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) only_free: Option<bool>,
    /// Leave public facilities out of the results.
    #[arg(long = ARG_EXCLUDE_PUBLIC, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) exclude_public: Option<bool>,
    /// Leave cafes and shops out of the results.
    #[arg(long = ARG_EXCLUDE_COMMERCIAL, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) exclude_commercial: Option<bool>,
    /// Venue categories to search; defaults to the profile categories.
    #[arg(long = ARG_CATEGORY, value_name = "key", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) categories: Option<Vec<String>>,
    /// API key for the Seoul public-toilet registry.
    #[arg(long = ARG_SEOUL_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) seoul_api_key: Option<String>,
    /// Override the Seoul registry endpoint.
    #[arg(long = ARG_SEOUL_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) seoul_base_url: Option<String>,
    /// REST API key for the Kakao Local directory.
    #[arg(long = ARG_KAKAO_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) kakao_api_key: Option<String>,
    /// Override the Kakao Local endpoint.
    #[arg(long = ARG_KAKAO_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) kakao_base_url: Option<String>,
    /// API key for the Places Nearby Search, which adds ratings and price tiers.
    #[arg(long = ARG_PLACES_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) places_api_key: Option<String>,
    /// Override the Places endpoint.
    #[arg(long = ARG_PLACES_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) places_base_url: Option<String>,
    /// Per-request timeout for upstream sources, in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Include summary statistics in the output.
    #[arg(long = ARG_STATS, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) stats: Option<bool>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct SearchConfig {
    /// Search origin, `x = longitude`.
    pub(crate) origin: Coord<f64>,
    /// Selected urgency level.
    pub(crate) level: UrgencyLevel,
    /// Explicit source radius; `None` uses the profile radius.
    pub(crate) radius_meters: Option<f64>,
    /// Inclusion rules.
    pub(crate) filters: SearchFilters,
    /// Explicit categories; `None` uses the profile categories.
    pub(crate) categories: Option<Vec<&'static VenueCategory>>,
    /// Registry connection, when a key is configured.
    pub(crate) seoul: Option<HttpSourceConfig>,
    /// Directory connection, when a key is configured.
    pub(crate) kakao: Option<HttpSourceConfig>,
    /// Rated directory connection, when a key is configured.
    pub(crate) places: Option<HttpSourceConfig>,
    /// Whether to attach statistics to the output.
    pub(crate) include_stats: bool,
}

impl SearchConfig {
    /// Query handed to the engine.
    pub(crate) fn query(&self) -> SearchQuery {
        let mut query = SearchQuery::for_profile(self.origin, self.level.profile(), self.filters);
        if let Some(radius) = self.radius_meters {
            query.radius_meters = radius;
        }
        if let Some(categories) = &self.categories {
            if self.filters.include_commercial {
                query.categories.clone_from(categories);
            }
        }
        query
    }
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let latitude = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_LAT,
        })?;
        let longitude = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_LNG,
        })?;
        let level = args
            .urgency
            .as_deref()
            .map(UrgencyLevel::from_key)
            .unwrap_or_default();
        let categories = args
            .categories
            .map(|keys| resolve_categories(&keys))
            .transpose()?;

        let defaults = SearchFilters::default();
        let filters = SearchFilters {
            include_public: !args.exclude_public.unwrap_or(false),
            include_commercial: !args.exclude_commercial.unwrap_or(false),
            only_free: args.only_free.unwrap_or(false),
            min_quality: args.min_quality.unwrap_or(defaults.min_quality),
            max_distance: args.max_distance.unwrap_or(defaults.max_distance),
        };

        let timeout = args.timeout_secs.map(Duration::from_secs);
        let registry = source_config(
            args.seoul_api_key,
            args.seoul_base_url,
            seoul::DEFAULT_BASE_URL,
            timeout,
        );
        let directory = source_config(
            args.kakao_api_key,
            args.kakao_base_url,
            kakao::DEFAULT_BASE_URL,
            timeout,
        );
        let rated_directory = source_config(
            args.places_api_key,
            args.places_base_url,
            places::DEFAULT_BASE_URL,
            timeout,
        );
        if registry.is_none() && directory.is_none() && rated_directory.is_none() {
            return Err(CliError::NoSourcesConfigured {
                seoul: ARG_SEOUL_API_KEY,
                seoul_env: ENV_SEOUL_API_KEY,
                kakao: ARG_KAKAO_API_KEY,
                kakao_env: ENV_KAKAO_API_KEY,
                places: ARG_PLACES_API_KEY,
                places_env: ENV_PLACES_API_KEY,
            });
        }

        Ok(Self {
            origin: Coord {
                x: longitude,
                y: latitude,
            },
            level,
            radius_meters: args.radius,
            filters,
            categories,
            seoul: registry,
            kakao: directory,
            places: rated_directory,
            include_stats: args.stats.unwrap_or(false),
        })
    }
}

fn resolve_categories(keys: &[String]) -> Result<Vec<&'static VenueCategory>, CliError> {
    keys.iter()
        .map(|key| key.trim())
        .filter(|key| !key.is_empty())
        .map(|key| {
            VenueCategory::lookup(key).ok_or_else(|| CliError::UnknownCategory {
                key: key.to_owned(),
            })
        })
        .collect()
}

/// Connection settings for a source whose key is present and non-blank.
fn source_config(
    api_key: Option<String>,
    base_url: Option<String>,
    default_base_url: &str,
    timeout: Option<Duration>,
) -> Option<HttpSourceConfig> {
    let key = api_key.filter(|key| !key.trim().is_empty())?;
    let base = base_url.unwrap_or_else(|| default_base_url.to_owned());
    let mut config = HttpSourceConfig::new(base, key);
    if let Some(limit) = timeout {
        config = config.with_timeout(limit);
    }
    Some(config)
}

/// Builds the source adapters for the current search invocation.
pub(super) trait SourceAdapterBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Vec<Box<dyn SourceAdapter>>, CliError>;
}

pub(super) struct DefaultSourceAdapterBuilder;

impl SourceAdapterBuilder for DefaultSourceAdapterBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Vec<Box<dyn SourceAdapter>>, CliError> {
        let mut adapters: Vec<Box<dyn SourceAdapter>> = Vec::with_capacity(3);
        if let Some(http) = &config.seoul {
            let adapter = SeoulRegistryAdapter::new(http.clone()).map_err(|source| {
                CliError::BuildSource {
                    adapter: SEOUL_ADAPTER,
                    base_url: http.base_url.clone(),
                    source,
                }
            })?;
            adapters.push(Box::new(adapter));
        }
        if let Some(http) = &config.kakao {
            let adapter = KakaoDirectoryAdapter::new(http.clone()).map_err(|source| {
                CliError::BuildSource {
                    adapter: KAKAO_ADAPTER,
                    base_url: http.base_url.clone(),
                    source,
                }
            })?;
            adapters.push(Box::new(adapter));
        }
        if let Some(http) = &config.places {
            let adapter = PlacesDirectoryAdapter::new(http.clone()).map_err(|source| {
                CliError::BuildSource {
                    adapter: PLACES_ADAPTER,
                    base_url: http.base_url.clone(),
                    source,
                }
            })?;
            adapters.push(Box::new(adapter));
        }
        Ok(adapters)
    }
}

/// JSON document printed by the `search` command.
#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    #[serde(flatten)]
    envelope: &'a ResultEnvelope,
    outcome: SearchOutcome,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<SearchStats>,
}

impl<'a> SearchOutput<'a> {
    fn new(envelope: &'a ResultEnvelope, include_stats: bool) -> Self {
        Self {
            envelope,
            outcome: envelope.outcome(),
            message: envelope.message(),
            stats: include_stats.then(|| envelope.stats()),
        }
    }
}

pub(super) fn run_search(args: SearchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSourceAdapterBuilder;
    run_search_with(args, &builder, &mut stdout)
}

pub(super) fn run_search_with(
    args: SearchArgs,
    builder: &dyn SourceAdapterBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let envelope = execute_search(&config, builder)?;
    write_search_output(writer, &SearchOutput::new(&envelope, config.include_stats))
}

fn execute_search(
    config: &SearchConfig,
    builder: &dyn SourceAdapterBuilder,
) -> Result<ResultEnvelope, CliError> {
    let engine = SearchEngine::new(builder.build(config)?);
    let query = config.query();
    log::debug!(
        "searching {} sources within {}m for a {} user",
        engine.adapter_count(),
        query.radius_meters,
        config.level
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let envelope = runtime.block_on(engine.search(&query));
    if let Some(error) = &envelope.error {
        log::warn!("search fell back to sample locations: {error}");
    }
    Ok(envelope)
}

fn write_search_output(writer: &mut dyn Write, output: &SearchOutput<'_>) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerializeSearchOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSearchOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteSearchOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
