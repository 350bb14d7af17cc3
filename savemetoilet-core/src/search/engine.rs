//! Fan out to source adapters and run the ranking pipeline.

use futures_util::future::join_all;

use crate::dedup::{DedupConfig, deduplicate};
use crate::entry::{BucketThresholds, Entry, EntryKind};
use crate::fallback::{self, DEFAULT_ORIGIN};
use crate::normalize::{Candidate, Normalizer};
use crate::quality::QualityScorer;
use crate::rank::UrgencyRanker;
use crate::raw::RawRecord;
use crate::source::{AdapterError, SourceAdapter};

use super::{ResultEnvelope, SearchError, SearchPhase, SearchQuery, SourceCounts};

/// Tunable thresholds used by the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineConfig {
    /// Duplicate detection settings.
    pub dedup: DedupConfig,
    /// Urgency bucket cut-offs.
    pub buckets: BucketThresholds,
    /// Rating and price adjustments.
    pub quality: QualityScorer,
}

/// Search orchestrator owning an ordered list of source adapters.
///
/// Each call to [`SearchEngine::search`] is independent; no state is kept
/// between invocations.
pub struct SearchEngine {
    adapters: Vec<Box<dyn SourceAdapter>>,
    config: EngineConfig,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field(
                "adapters",
                &self.adapters.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

struct Phase(SearchPhase);

impl Phase {
    const fn start() -> Self {
        Self(SearchPhase::Idle)
    }

    fn advance(&mut self, next: SearchPhase) {
        log::debug!("search phase {:?} -> {:?}", self.0, next);
        self.0 = next;
    }
}

impl SearchEngine {
    /// Create an engine with default thresholds.
    #[must_use]
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>) -> Self {
        Self::with_config(adapters, EngineConfig::default())
    }

    /// Create an engine with explicit thresholds.
    #[must_use]
    pub fn with_config(adapters: Vec<Box<dyn SourceAdapter>>, config: EngineConfig) -> Self {
        Self { adapters, config }
    }

    /// Pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of registered adapters.
    #[must_use]
    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// Run a search.
    ///
    /// All enabled adapters are polled concurrently and every one is awaited,
    /// whatever the others return. Results are joined public adapters first,
    /// then commercial ones, each group in registration order. Commercial
    /// adapters are skipped when the query enables no categories.
    ///
    /// The envelope reports failure only when the query is invalid or every
    /// enabled adapter failed; it then carries the built-in sample list.
    pub async fn search(&self, query: &SearchQuery) -> ResultEnvelope {
        let mut phase = Phase::start();
        if let Err(err) = query.validate() {
            phase.advance(SearchPhase::Failed);
            return self.fail(query, &err);
        }

        phase.advance(SearchPhase::Fetching);
        let batches = match self.fetch(query).await {
            Ok(batches) => batches,
            Err(err) => {
                phase.advance(SearchPhase::Failed);
                return self.fail(query, &err);
            }
        };

        phase.advance(SearchPhase::Normalizing);
        let normalizer = Normalizer::with_thresholds(query.origin, self.config.buckets);
        let mut counts = SourceCounts::default();
        let candidates: Vec<Candidate> = batches
            .into_iter()
            .flatten()
            .filter_map(|record| normalizer.normalize(record))
            .inspect(|candidate| counts.record(candidate.kind))
            .collect();

        phase.advance(SearchPhase::Ranking);
        let entries = self.rank(query, candidates);

        phase.advance(SearchPhase::Done);
        ResultEnvelope::found(entries, counts)
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Vec<RawRecord>>, SearchError> {
        let mut enabled: Vec<&dyn SourceAdapter> = self
            .adapters
            .iter()
            .map(|adapter| adapter.as_ref())
            .filter(|adapter| {
                adapter.kind() == EntryKind::PublicFacility || !query.categories.is_empty()
            })
            .collect();
        enabled.sort_by_key(|adapter| adapter.kind().priority());
        if enabled.is_empty() {
            log::debug!("no source adapters enabled for this query");
            return Ok(Vec::new());
        }

        let calls = enabled.iter().map(|adapter| {
            adapter.search_near(query.origin, query.radius_meters, &query.categories)
        });
        let settled: Vec<Result<Vec<RawRecord>, AdapterError>> = join_all(calls).await;

        let attempted = settled.len();
        let batches: Vec<Vec<RawRecord>> = enabled
            .iter()
            .zip(settled)
            .filter_map(|(adapter, result)| match result {
                Ok(records) => {
                    log::debug!("{} returned {} records", adapter.name(), records.len());
                    Some(records)
                }
                Err(err) => {
                    log::warn!("{} search failed: {err}", adapter.name());
                    None
                }
            })
            .collect();

        if batches.is_empty() {
            return Err(SearchError::AllSourcesFailed { attempted });
        }
        Ok(batches)
    }

    fn rank(&self, query: &SearchQuery, candidates: Vec<Candidate>) -> Vec<Entry> {
        let unique = deduplicate(candidates, &self.config.dedup);
        let scored: Vec<Entry> = unique
            .into_iter()
            .map(|candidate| {
                let quality = self.config.quality.score(&candidate.signals);
                candidate.into_entry(quality)
            })
            .collect();
        let ranked = UrgencyRanker::new(query.profile).rank(scored);
        query.filters.apply(ranked)
    }

    fn fail(&self, query: &SearchQuery, err: &SearchError) -> ResultEnvelope {
        log::warn!("search failed: {err}");
        let origin = if query.validate().is_ok() {
            query.origin
        } else {
            DEFAULT_ORIGIN
        };
        let samples = fallback::sample_entries(origin, &self.config.buckets);
        let ranked = UrgencyRanker::new(query.profile).rank(samples);
        ResultEnvelope::failed(err.to_string(), ranked)
    }
}
