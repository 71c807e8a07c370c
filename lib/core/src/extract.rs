//! Tag extraction: resolve the classification terms of a reference item.

use crate::{ContentId, ContentSource, Result, TermId, VocabularyId};
use std::collections::BTreeSet;

/// Resolve the classification-term ids attached to a content item,
/// restricted to `vocabularies` when that set is non-empty.
///
/// An empty vocabulary set means no group filter: every registered term on
/// the item passes. Duplicate references collapse into the returned set.
/// Pure read; no index state is touched.
pub fn resolve_term_ids(
    source: &dyn ContentSource,
    id: ContentId,
    vocabularies: &BTreeSet<VocabularyId>,
) -> Result<BTreeSet<TermId>> {
    let mut resolved = BTreeSet::new();
    for (term, vocabulary) in source.referenced_terms(id)? {
        if vocabularies.is_empty() || vocabularies.contains(&vocabulary) {
            resolved.insert(term);
        }
    }
    Ok(resolved)
}
