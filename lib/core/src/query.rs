use crate::{ContentId, VocabularyId};
use std::collections::BTreeSet;
use std::time::Duration;

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// The configured request describing reference item, filters, limits and
/// exclusions.
///
/// Built fluently, the query holds raw criteria only; term resolution and
/// ranking both happen inside the execute call, so configuration steps can
/// run in any order. One query describes one logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceQuery {
    reference: Option<ContentId>,
    vocabularies: BTreeSet<VocabularyId>,
    allowed_types: BTreeSet<String>,
    excluded: BTreeSet<ContentId>,
    max_results: usize,
    timeout: Option<Duration>,
}

impl Default for RelevanceQuery {
    fn default() -> Self {
        Self {
            reference: None,
            vocabularies: BTreeSet::new(),
            allowed_types: BTreeSet::new(),
            excluded: BTreeSet::new(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout: None,
        }
    }
}

impl RelevanceQuery {
    /// Start a query for content relevant to `reference`.
    #[inline]
    #[must_use]
    pub fn new(reference: ContentId) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }

    /// Set the reference content item.
    #[inline]
    #[must_use]
    pub fn reference(mut self, id: ContentId) -> Self {
        self.reference = Some(id);
        self
    }

    /// Replace the vocabulary filter set. Empty means unfiltered.
    #[must_use]
    pub fn vocabularies<I, V>(mut self, vocabularies: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<VocabularyId>,
    {
        self.vocabularies = vocabularies.into_iter().map(Into::into).collect();
        self
    }

    /// Add one vocabulary to the filter set.
    #[inline]
    #[must_use]
    pub fn vocabulary(mut self, vocabulary: impl Into<VocabularyId>) -> Self {
        self.vocabularies.insert(vocabulary.into());
        self
    }

    /// Replace the content-type allow-list. Empty means all types pass.
    #[must_use]
    pub fn allowed_types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Append one content type to the allow-list.
    #[inline]
    #[must_use]
    pub fn allow_type(mut self, content_type: impl Into<String>) -> Self {
        self.allowed_types.insert(content_type.into());
        self
    }

    /// Exclude a content id from the results. The reference item's own id is
    /// always excluded regardless of this list.
    #[inline]
    #[must_use]
    pub fn exclude(mut self, id: ContentId) -> Self {
        self.excluded.insert(id);
        self
    }

    /// Set the maximum result count. Zero is silently ignored, leaving the
    /// prior value (default 5).
    #[inline]
    #[must_use]
    pub fn max_results(mut self, max: usize) -> Self {
        if max > 0 {
            self.max_results = max;
        }
        self
    }

    /// Bound the candidate scan. Expiry fails the query with
    /// [`Error::Timeout`](crate::Error::Timeout).
    #[inline]
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[inline]
    #[must_use]
    pub fn reference_id(&self) -> Option<ContentId> {
        self.reference
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_filter(&self) -> &BTreeSet<VocabularyId> {
        &self.vocabularies
    }

    #[inline]
    #[must_use]
    pub fn type_filter(&self) -> &BTreeSet<String> {
        &self.allowed_types
    }

    #[inline]
    #[must_use]
    pub fn excluded_ids(&self) -> &BTreeSet<ContentId> {
        &self.excluded
    }

    #[inline]
    #[must_use]
    pub fn limit(&self) -> usize {
        self.max_results
    }

    #[inline]
    #[must_use]
    pub fn scan_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
