//! HTTP source adapters for the SaveMeToilet engine.
//!
//! Responsibilities:
//! - Translate upstream payloads into `savemetoilet_core::RawRecord`s.
//! - Map transport and service failures onto `AdapterError`.
//!
//! Boundaries:
//! - Do not encode ranking or quality rules (live in `savemetoilet-core`).
//! - Never log credentials; keys are redacted from URLs and messages.

#![forbid(unsafe_code)]

mod directory;
pub mod http;
pub mod kakao;
pub mod places;
pub mod seoul;

pub use http::{DEFAULT_USER_AGENT, HttpSourceBuildError, HttpSourceConfig};
pub use kakao::KakaoDirectoryAdapter;
pub use places::PlacesDirectoryAdapter;
pub use seoul::SeoulRegistryAdapter;
