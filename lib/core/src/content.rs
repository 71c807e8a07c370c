use serde::{Deserialize, Serialize};

/// Unique identifier of a content item.
pub type ContentId = u64;

/// Unique identifier of a classification term.
pub type TermId = u64;

/// Machine name of a classification group (vocabulary).
pub type VocabularyId = String;

/// A unit of published material with a type tag and classification-term
/// references.
///
/// The engine only reads content items; ownership stays with the content
/// store that populated the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub id: ContentId,
    /// Content-type tag, e.g. "article" or "recipe".
    pub content_type: String,
    /// Only published items are candidates for relevance results.
    #[serde(default = "default_published")]
    pub published: bool,
    /// Creation time as unix seconds. Recency tie-break key.
    pub created: i64,
    /// Referenced classification terms, one entry per reference-field value.
    /// Duplicates are permitted here and collapsed during extraction.
    #[serde(default)]
    pub terms: Vec<TermId>,
    /// Opaque display fields (title, teaser text, ...). Never interpreted by
    /// the ranker; carried through for display resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

fn default_published() -> bool {
    true
}

impl ContentItem {
    #[inline]
    #[must_use]
    pub fn new(id: ContentId, content_type: impl Into<String>, created: i64) -> Self {
        Self {
            id,
            content_type: content_type.into(),
            published: true,
            created,
            terms: Vec::new(),
            payload: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_terms(mut self, terms: impl IntoIterator<Item = TermId>) -> Self {
        self.terms = terms.into_iter().collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A classification term and the vocabulary that owns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Term {
    pub id: TermId,
    pub vocabulary: VocabularyId,
}

impl Term {
    #[inline]
    #[must_use]
    pub fn new(id: TermId, vocabulary: impl Into<VocabularyId>) -> Self {
        Self {
            id,
            vocabulary: vocabulary.into(),
        }
    }
}

/// A named collection of related classification terms.
///
/// Used as a filter key by the engine; the label exists for the
/// configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vocabulary {
    pub id: VocabularyId,
    pub label: String,
}

impl Vocabulary {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<VocabularyId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
