use crate::{
    Candidate, ContentId, ContentItem, ContentSource, Result, Term, TermId, Vocabulary,
    VocabularyId,
};
use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// In-memory content and taxonomy index.
///
/// Holds content items, the term registry (term -> owning vocabulary) and an
/// inverted index from term id to referencing content ids, maintained on
/// every upsert/remove. All methods take `&self`; interior locks make a
/// shared `Arc<ContentIndex>` usable across threads.
pub struct ContentIndex {
    items: RwLock<AHashMap<ContentId, ContentItem>>,
    // term -> owning vocabulary
    terms: RwLock<AHashMap<TermId, VocabularyId>>,
    vocabularies: RwLock<AHashMap<VocabularyId, Vocabulary>>,
    // term -> content ids referencing it
    inverted: RwLock<AHashMap<TermId, AHashSet<ContentId>>>,
}

impl ContentIndex {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RwLock::new(AHashMap::new()),
            terms: RwLock::new(AHashMap::new()),
            vocabularies: RwLock::new(AHashMap::new()),
            inverted: RwLock::new(AHashMap::new()),
        }
    }

    /// Register or replace a vocabulary.
    pub fn upsert_vocabulary(&self, vocabulary: Vocabulary) {
        self.vocabularies
            .write()
            .insert(vocabulary.id.clone(), vocabulary);
    }

    /// Register or replace a classification term.
    pub fn upsert_term(&self, term: Term) {
        self.terms.write().insert(term.id, term.vocabulary);
    }

    pub fn upsert_terms(&self, terms: impl IntoIterator<Item = Term>) {
        let mut registry = self.terms.write();
        for term in terms {
            registry.insert(term.id, term.vocabulary);
        }
    }

    /// Insert or update a content item, keeping the inverted index in sync.
    pub fn upsert(&self, item: ContentItem) {
        let id = item.id;
        self.remove(id);

        let mut inverted = self.inverted.write();
        for term in &item.terms {
            inverted.entry(*term).or_default().insert(id);
        }
        drop(inverted);

        self.items.write().insert(id, item);
    }

    /// Remove a content item. Returns whether it existed.
    pub fn remove(&self, id: ContentId) -> bool {
        let removed = self.items.write().remove(&id);
        if let Some(old) = &removed {
            let mut inverted = self.inverted.write();
            for term in &old.terms {
                if let Some(postings) = inverted.get_mut(term) {
                    postings.remove(&id);
                    if postings.is_empty() {
                        inverted.remove(term);
                    }
                }
            }
        }
        removed.is_some()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: ContentId) -> Option<ContentItem> {
        self.items.read().get(&id).cloned()
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.read().len()
    }

    #[inline]
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.read().len()
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_count(&self) -> usize {
        self.vocabularies.read().len()
    }

    /// All vocabularies, sorted by id for a stable listing.
    #[must_use]
    pub fn list_vocabularies(&self) -> Vec<Vocabulary> {
        let mut out: Vec<Vocabulary> = self.vocabularies.read().values().cloned().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Distinct content types present in the index, sorted.
    #[must_use]
    pub fn list_types(&self) -> Vec<String> {
        let types: BTreeSet<String> = self
            .items
            .read()
            .values()
            .map(|item| item.content_type.clone())
            .collect();
        types.into_iter().collect()
    }

    /// All content items. Snapshot helper; order is unspecified.
    #[must_use]
    pub fn all_items(&self) -> Vec<ContentItem> {
        self.items.read().values().cloned().collect()
    }

    /// All registered terms. Snapshot helper; order is unspecified.
    #[must_use]
    pub fn all_terms(&self) -> Vec<Term> {
        self.terms
            .read()
            .iter()
            .map(|(id, vocabulary)| Term {
                id: *id,
                vocabulary: vocabulary.clone(),
            })
            .collect()
    }
}

impl Default for ContentIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSource for ContentIndex {
    fn referenced_terms(&self, id: ContentId) -> Result<Vec<(TermId, VocabularyId)>> {
        let items = self.items.read();
        let Some(item) = items.get(&id) else {
            return Ok(Vec::new());
        };
        let registry = self.terms.read();
        // Unregistered term references drop out here, matching a join
        // against the term registry.
        Ok(item
            .terms
            .iter()
            .filter_map(|term| {
                registry
                    .get(term)
                    .map(|vocabulary| (*term, vocabulary.clone()))
            })
            .collect())
    }

    fn scan_referencing(&self, terms: &BTreeSet<TermId>) -> Result<Vec<Candidate>> {
        let inverted = self.inverted.read();

        // content id -> distinct matching term count
        let mut overlaps: AHashMap<ContentId, usize> = AHashMap::new();
        for term in terms {
            if let Some(postings) = inverted.get(term) {
                for id in postings {
                    *overlaps.entry(*id).or_insert(0) += 1;
                }
            }
        }
        drop(inverted);

        let items = self.items.read();
        Ok(overlaps
            .into_iter()
            .filter_map(|(id, overlap)| {
                items.get(&id).map(|item| Candidate {
                    id,
                    content_type: item.content_type.clone(),
                    published: item.published,
                    created: item.created,
                    overlap,
                })
            })
            .collect())
    }

    fn load(&self, id: ContentId) -> Result<Option<ContentItem>> {
        Ok(self.get(id))
    }
}
