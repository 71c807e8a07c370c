//! Relevance ranking: overlap scoring, filtering, ordering, truncation.

use crate::{Candidate, ContentId, ContentSource, Error, RelevanceQuery, Result, TermId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;

// Deadline checks are amortized over this many candidates.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// One ordered result row: a content id, its type tag and the number of
/// classification terms it shares with the reference item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelevanceHit {
    pub id: ContentId,
    pub content_type: String,
    pub overlap: usize,
}

/// Rank candidates referencing any of `terms` against the query's filters.
///
/// Fails with [`Error::InvalidQuery`] when the query has no reference item
/// or `terms` is empty; there is nothing to compare against. An empty
/// survivor set is a normal empty result, not an error.
///
/// Ordering is overlap count, then creation time, then content id, all
/// descending, truncated to the query's limit. Deterministic for a fixed
/// index state.
pub fn rank_terms(
    source: &dyn ContentSource,
    terms: &BTreeSet<TermId>,
    query: &RelevanceQuery,
) -> Result<Vec<RelevanceHit>> {
    let reference = query
        .reference_id()
        .ok_or_else(|| Error::InvalidQuery("no reference content item set".into()))?;
    if terms.is_empty() {
        return Err(Error::InvalidQuery(
            "reference item has no matching classification terms".into(),
        ));
    }

    // A timeout too large to represent as a deadline means no deadline.
    let deadline = query
        .scan_timeout()
        .and_then(|t| Instant::now().checked_add(t));

    // A self-match is never relevant.
    let mut excluded = query.excluded_ids().clone();
    excluded.insert(reference);

    let allowed_types = query.type_filter();
    let mut survivors: Vec<Candidate> = Vec::new();
    for (seen, candidate) in source.scan_referencing(terms)?.into_iter().enumerate() {
        if seen % DEADLINE_CHECK_INTERVAL == 0 {
            if let Some(deadline) = deadline {
                if Instant::now() > deadline {
                    return Err(Error::Timeout);
                }
            }
        }
        if !candidate.published || excluded.contains(&candidate.id) {
            continue;
        }
        if !allowed_types.is_empty() && !allowed_types.contains(&candidate.content_type) {
            continue;
        }
        survivors.push(candidate);
    }

    survivors.sort_by(|a, b| {
        b.overlap
            .cmp(&a.overlap)
            .then_with(|| b.created.cmp(&a.created))
            .then_with(|| b.id.cmp(&a.id))
    });
    survivors.truncate(query.limit());

    Ok(survivors
        .into_iter()
        .map(|c| RelevanceHit {
            id: c.id,
            content_type: c.content_type,
            overlap: c.overlap,
        })
        .collect())
}
