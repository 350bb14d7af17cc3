//! Error types emitted by the SaveMeToilet CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use savemetoilet_data::HttpSourceBuildError;
use thiserror::Error;

/// Errors emitted by the SaveMeToilet CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable carrying the same setting.
        env: &'static str,
    },
    /// A requested venue category is not in the catalogue.
    #[error("unknown venue category {key:?}")]
    UnknownCategory {
        /// The rejected key.
        key: String,
    },
    /// No source has an API key, so a search could never return data.
    #[error(
        "no sources configured (set --{seoul} or {seoul_env}, --{kakao} or {kakao_env}, \
         or --{places} or {places_env})"
    )]
    NoSourcesConfigured {
        /// Registry key flag.
        seoul: &'static str,
        /// Registry key environment variable.
        seoul_env: &'static str,
        /// Directory key flag.
        kakao: &'static str,
        /// Directory key environment variable.
        kakao_env: &'static str,
        /// Rated directory key flag.
        places: &'static str,
        /// Rated directory key environment variable.
        places_env: &'static str,
    },
    /// Constructing a source adapter failed.
    #[error("failed to build {adapter} source for {base_url:?}: {source}")]
    BuildSource {
        /// Adapter being built.
        adapter: &'static str,
        /// Configured service root.
        base_url: String,
        /// Underlying client error.
        #[source]
        source: HttpSourceBuildError,
    },
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serializing the search output failed.
    #[error("failed to serialize search output: {0}")]
    SerializeSearchOutput(#[source] serde_json::Error),
    /// Writing the search output failed.
    #[error("failed to write search output: {0}")]
    WriteSearchOutput(#[source] std::io::Error),
}
