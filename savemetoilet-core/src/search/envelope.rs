//! Result envelope returned by every search.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryKind};
use crate::stats::SearchStats;

/// Message shown when a search succeeds but nothing survives filtering.
pub const EMPTY_MESSAGE: &str = "nothing nearby, try widening your search";

/// Prefix of the message shown when every source failed.
pub const FAILED_MESSAGE: &str = "search failed, showing sample locations instead";

/// Entries found per kind, counted after normalization and before
/// deduplication and filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceCounts {
    /// Public facilities found.
    pub public: usize,
    /// Commercial venues found.
    pub commercial: usize,
}

impl SourceCounts {
    /// Count one normalized record of `kind`.
    pub const fn record(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::PublicFacility => self.public += 1,
            EntryKind::CommercialVenue => self.commercial += 1,
        }
    }

    /// Total across kinds.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.public + self.commercial
    }
}

/// How a search ended, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchOutcome {
    /// At least one entry survived filtering.
    Found,
    /// The search worked but nothing matched.
    Empty,
    /// The search could not run; entries hold sample locations.
    Failed,
}

/// Outcome of one search invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultEnvelope {
    /// `false` only when the search itself failed.
    pub success: bool,
    /// Ranked, filtered entries; sample locations on failure.
    pub entries: Vec<Entry>,
    /// Per-kind counts of what the sources returned.
    pub source_counts: SourceCounts,
    /// Failure description when `success` is `false`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl ResultEnvelope {
    /// Successful envelope.
    #[must_use]
    pub const fn found(entries: Vec<Entry>, source_counts: SourceCounts) -> Self {
        Self {
            success: true,
            entries,
            source_counts,
            error: None,
        }
    }

    /// Failed envelope carrying fallback entries.
    #[must_use]
    pub fn failed(error: impl Into<String>, fallback: Vec<Entry>) -> Self {
        Self {
            success: false,
            entries: fallback,
            source_counts: SourceCounts::default(),
            error: Some(error.into()),
        }
    }

    /// Classify the envelope.
    #[must_use]
    pub fn outcome(&self) -> SearchOutcome {
        if !self.success {
            SearchOutcome::Failed
        } else if self.entries.is_empty() {
            SearchOutcome::Empty
        } else {
            SearchOutcome::Found
        }
    }

    /// User-facing summary; empty and failed searches read differently.
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::{ResultEnvelope, SourceCounts};
    ///
    /// let empty = ResultEnvelope::found(Vec::new(), SourceCounts::default());
    /// assert_eq!(empty.message(), "nothing nearby, try widening your search");
    ///
    /// let failed = ResultEnvelope::failed("all sources failed", Vec::new());
    /// assert!(failed.message().starts_with("search failed"));
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match self.outcome() {
            SearchOutcome::Found => match self.entries.len() {
                1 => "found 1 restroom nearby".to_owned(),
                count => format!("found {count} restrooms nearby"),
            },
            SearchOutcome::Empty => EMPTY_MESSAGE.to_owned(),
            SearchOutcome::Failed => match &self.error {
                Some(error) => format!("{FAILED_MESSAGE}: {error}"),
                None => FAILED_MESSAGE.to_owned(),
            },
        }
    }

    /// Statistics over the returned entries.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats::from_entries(&self.entries)
    }
}
