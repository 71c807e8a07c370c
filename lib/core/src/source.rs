// Read capabilities the engine requires from a content store.
use crate::{ContentId, ContentItem, Result, TermId, VocabularyId};
use std::collections::BTreeSet;

/// A raw candidate row produced by scanning the term index.
///
/// The source reports every item referencing at least one query term;
/// exclusion, publish-status and content-type policy is applied by the
/// ranker so all result-set rules live in one place.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: ContentId,
    pub content_type: String,
    pub published: bool,
    pub created: i64,
    /// Number of distinct query terms this item references.
    pub overlap: usize,
}

/// Read-only contract between the engine and the content store.
///
/// The in-memory [`ContentIndex`](crate::ContentIndex) implements this; a
/// SQL join or a remote index can stand in behind the same seam.
pub trait ContentSource {
    /// List the classification terms referenced by a content item, with
    /// their owning vocabulary.
    ///
    /// Term references absent from the term registry are omitted, and an
    /// unknown content id yields an empty list.
    fn referenced_terms(&self, id: ContentId) -> Result<Vec<(TermId, VocabularyId)>>;

    /// List every item referencing at least one term in `terms`, with its
    /// distinct-overlap count.
    fn scan_referencing(&self, terms: &BTreeSet<TermId>) -> Result<Vec<Candidate>>;

    /// Load a full content item for display resolution.
    fn load(&self, id: ContentId) -> Result<Option<ContentItem>>;
}
