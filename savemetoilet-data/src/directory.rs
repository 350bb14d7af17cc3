//! Helpers shared by the place-directory adapters.

use std::collections::HashMap;

use savemetoilet_core::{AdapterError, RawRecord, VenueCategory};

/// Keep every successful call; fail only when all attempted calls failed.
///
/// No attempts at all is an empty success.
pub(crate) fn settle<T>(results: Vec<Result<T, AdapterError>>) -> Result<Vec<T>, AdapterError> {
    let mut first_error = None;
    let mut hits = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(hit) => hits.push(hit),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    match first_error {
        Some(err) if hits.is_empty() => Err(err),
        _ => Ok(hits),
    }
}

/// Keep one record per provider id from already-filtered records.
///
/// A place accepted under both a branded and a generic category keeps the
/// branded one; otherwise the first accepted record wins.
pub(crate) fn merge_by_id(
    accepted: impl IntoIterator<Item = (&'static VenueCategory, RawRecord)>,
) -> Vec<RawRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<(&'static VenueCategory, RawRecord)> = Vec::new();
    for (category, record) in accepted {
        let existing = index
            .get(record.provider_id())
            .and_then(|&position| kept.get_mut(position));
        if let Some(slot) = existing {
            if !is_branded(slot.0) && is_branded(category) {
                *slot = (category, record);
            }
            continue;
        }
        index.insert(record.provider_id().to_owned(), kept.len());
        kept.push((category, record));
    }
    kept.into_iter().map(|(_, record)| record).collect()
}

const fn is_branded(category: &VenueCategory) -> bool {
    !category.brand_keywords.is_empty()
}
