// Integration tests for the relevant engine
use relevant_core::{
    Candidate, ContentId, ContentIndex, ContentItem, ContentSource, Error, RelevanceEngine,
    RelevanceQuery, Term, TermId, Vocabulary, VocabularyId,
};
use relevant_storage::StorageManager;
use std::collections::BTreeSet;
use std::time::Duration;

fn seeded_index() -> ContentIndex {
    let index = ContentIndex::new();
    index.upsert_vocabulary(Vocabulary::new("topics", "Topics"));
    index.upsert_vocabulary(Vocabulary::new("regions", "Regions"));
    index.upsert_term(Term::new(1, "topics"));
    index.upsert_term(Term::new(2, "topics"));
    index.upsert_term(Term::new(3, "regions"));
    index
}

#[test]
fn test_overlap_scenario() {
    // Reference R has terms {T1, T2} in the allowed vocabulary. Candidate A
    // references {T1}, B references {T1, T2}, C references a term from a
    // vocabulary outside the filter.
    let index = seeded_index();
    index.upsert(ContentItem::new(1, "article", 1_000).with_terms([1, 2]));
    index.upsert(ContentItem::new(2, "article", 1_100).with_terms([1])); // A
    index.upsert(ContentItem::new(3, "article", 1_200).with_terms([1, 2])); // B
    index.upsert(ContentItem::new(4, "article", 1_300).with_terms([3])); // C

    let engine = RelevanceEngine::new(&index);
    let query = RelevanceQuery::new(1).vocabulary("topics");
    let hits = engine.try_execute(&query).unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!((hits[0].id, hits[0].overlap), (3, 2));
    assert_eq!((hits[1].id, hits[1].overlap), (2, 1));
}

#[test]
fn test_type_filter_excludes_matching_candidate() {
    let index = seeded_index();
    index.upsert(ContentItem::new(1, "article", 1_000).with_terms([1, 2]));
    index.upsert(ContentItem::new(2, "recipe", 1_100).with_terms([1, 2]));
    index.upsert(ContentItem::new(3, "article", 1_200).with_terms([1]));

    let engine = RelevanceEngine::new(&index);
    let query = RelevanceQuery::new(1)
        .vocabulary("topics")
        .allow_type("article");
    let hits = engine.try_execute(&query).unwrap();

    let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn test_explicit_exclusion() {
    let index = seeded_index();
    index.upsert(ContentItem::new(1, "article", 1_000).with_terms([1]));
    index.upsert(ContentItem::new(2, "article", 1_100).with_terms([1]));
    index.upsert(ContentItem::new(3, "article", 1_200).with_terms([1]));

    let engine = RelevanceEngine::new(&index);
    let query = RelevanceQuery::new(1).vocabulary("topics").exclude(2);
    let hits = engine.try_execute(&query).unwrap();

    let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn test_empty_vocabulary_filter_uses_all_terms() {
    let index = seeded_index();
    // Reference carries terms from both vocabularies.
    index.upsert(ContentItem::new(1, "article", 1_000).with_terms([1, 3]));
    index.upsert(ContentItem::new(2, "article", 1_100).with_terms([3]));

    let engine = RelevanceEngine::new(&index);
    let hits = engine.try_execute(&RelevanceQuery::new(1)).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);

    // With the filter restricted to "topics", the regions term drops out
    // and candidate 2 no longer matches.
    let filtered = engine
        .try_execute(&RelevanceQuery::new(1).vocabulary("topics"))
        .unwrap();
    assert!(filtered.is_empty());
}

#[test]
fn test_reference_never_in_results() {
    let index = seeded_index();
    for id in 1..=5 {
        index.upsert(ContentItem::new(id, "article", 1_000 + id as i64).with_terms([1]));
    }

    let engine = RelevanceEngine::new(&index);
    for id in 1..=5 {
        let hits = engine.try_execute(&RelevanceQuery::new(id)).unwrap();
        assert!(hits.iter().all(|h| h.id != id));
    }
}

#[test]
fn test_max_results_bound_and_default() {
    let index = seeded_index();
    for id in 1..=20 {
        index.upsert(ContentItem::new(id, "article", 1_000 + id as i64).with_terms([1]));
    }

    let engine = RelevanceEngine::new(&index);
    let hits = engine.try_execute(&RelevanceQuery::new(1)).unwrap();
    assert_eq!(hits.len(), 5); // default

    let hits = engine
        .try_execute(&RelevanceQuery::new(1).max_results(3))
        .unwrap();
    assert_eq!(hits.len(), 3);

    // Zero is ignored, leaving the default.
    let hits = engine
        .try_execute(&RelevanceQuery::new(1).max_results(0))
        .unwrap();
    assert_eq!(hits.len(), 5);
}

#[test]
fn test_tie_breaks_timestamp_then_identifier() {
    let index = seeded_index();
    index.upsert(ContentItem::new(1, "article", 1_000).with_terms([1]));
    // Same overlap, same timestamp, different id.
    index.upsert(ContentItem::new(10, "article", 2_000).with_terms([1]));
    index.upsert(ContentItem::new(11, "article", 2_000).with_terms([1]));
    // Same overlap, newer timestamp.
    index.upsert(ContentItem::new(5, "article", 3_000).with_terms([1]));

    let engine = RelevanceEngine::new(&index);
    let hits = engine.try_execute(&RelevanceQuery::new(1)).unwrap();
    let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![5, 11, 10]);
}

#[test]
fn test_deterministic_reruns() {
    let index = seeded_index();
    for id in 1..=50 {
        let terms: Vec<u64> = if id % 2 == 0 { vec![1, 2] } else { vec![1] };
        index.upsert(ContentItem::new(id, "article", 1_000).with_terms(terms));
    }

    let engine = RelevanceEngine::new(&index);
    let query = RelevanceQuery::new(1).max_results(10);
    let first = engine.try_execute(&query).unwrap();
    for _ in 0..5 {
        assert_eq!(engine.try_execute(&query).unwrap(), first);
    }
}

#[test]
fn test_no_terms_short_circuits() {
    let index = seeded_index();
    index.upsert(ContentItem::new(1, "article", 1_000));
    index.upsert(ContentItem::new(2, "article", 1_100).with_terms([1]));

    let engine = RelevanceEngine::new(&index);
    let err = engine.try_execute(&RelevanceQuery::new(1)).unwrap_err();
    assert!(matches!(err, Error::InvalidQuery(_)));

    // The lenient boundary degrades the same query to an empty result.
    assert!(engine.execute(&RelevanceQuery::new(1)).is_empty());
}

/// A content store whose read capabilities always fail, standing in for an
/// unavailable index backend.
struct UnavailableSource;

impl ContentSource for UnavailableSource {
    fn referenced_terms(
        &self,
        _id: ContentId,
    ) -> relevant_core::Result<Vec<(TermId, VocabularyId)>> {
        Err(Error::DataSource("term index unavailable".into()))
    }

    fn scan_referencing(
        &self,
        _terms: &BTreeSet<TermId>,
    ) -> relevant_core::Result<Vec<Candidate>> {
        Err(Error::DataSource("content index unavailable".into()))
    }

    fn load(&self, _id: ContentId) -> relevant_core::Result<Option<ContentItem>> {
        Err(Error::DataSource("content index unavailable".into()))
    }
}

#[test]
fn test_data_source_failure_degrades_to_empty() {
    let source = UnavailableSource;
    let engine = RelevanceEngine::new(&source);
    let query = RelevanceQuery::new(1).vocabulary("topics");

    let err = engine.try_execute(&query).unwrap_err();
    assert!(matches!(err, Error::DataSource(_)));

    // The lenient boundary renders the failure as "no relevant content".
    assert!(engine.execute(&query).is_empty());
}

#[test]
fn test_scan_timeout_degrades_to_empty() {
    let index = seeded_index();
    index.upsert(ContentItem::new(1, "article", 1_000).with_terms([1]));
    index.upsert(ContentItem::new(2, "article", 1_100).with_terms([1]));

    let engine = RelevanceEngine::new(&index);
    let query = RelevanceQuery::new(1).timeout(Duration::ZERO);

    let err = engine.try_execute(&query).unwrap_err();
    assert!(matches!(err, Error::Timeout));
    assert!(engine.execute(&query).is_empty());

    // An effectively unbounded timeout never expires.
    let unbounded = RelevanceQuery::new(1).timeout(Duration::MAX);
    let hits = engine.try_execute(&unbounded).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_execute_swallows_missing_reference() {
    let index = seeded_index();
    let engine = RelevanceEngine::new(&index);
    assert!(engine.execute(&RelevanceQuery::default()).is_empty());
}

#[test]
fn test_resolve_display_items() {
    let index = seeded_index();
    index.upsert(
        ContentItem::new(1, "article", 1_000)
            .with_terms([1])
            .with_payload(serde_json::json!({"title": "Reference"})),
    );
    index.upsert(
        ContentItem::new(2, "article", 1_100)
            .with_terms([1])
            .with_payload(serde_json::json!({"title": "Candidate"})),
    );

    let engine = RelevanceEngine::new(&index);
    let hits = engine.try_execute(&RelevanceQuery::new(1)).unwrap();

    let resolved = engine.resolve(&hits, None).unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].view_mode, "teaser");
    assert_eq!(resolved[0].overlap, 1);
    assert_eq!(
        resolved[0].item.payload.as_ref().unwrap()["title"],
        "Candidate"
    );

    let cards = engine.resolve(&hits, Some("card")).unwrap();
    assert_eq!(cards[0].view_mode, "card");

    // Items deleted between ranking and resolution are skipped.
    index.remove(2);
    assert!(engine.resolve(&hits, None).unwrap().is_empty());
}

#[test]
fn test_storage_snapshot_preserves_ranking() {
    let temp_dir = tempfile::tempdir().unwrap();

    {
        let storage = StorageManager::with_save_interval(temp_dir.path(), None).unwrap();
        let index = storage.index();
        index.upsert_vocabulary(Vocabulary::new("topics", "Topics"));
        index.upsert_term(Term::new(1, "topics"));
        index.upsert_term(Term::new(2, "topics"));
        index.upsert(ContentItem::new(1, "article", 1_000).with_terms([1, 2]));
        index.upsert(ContentItem::new(2, "article", 1_100).with_terms([1]));
        index.upsert(ContentItem::new(3, "article", 1_200).with_terms([1, 2]));
        storage.save().unwrap();
    }

    // Simulated restart.
    let storage = StorageManager::with_save_interval(temp_dir.path(), None).unwrap();
    let index = storage.index();
    assert_eq!(index.count(), 3);

    let engine = RelevanceEngine::new(index.as_ref());
    let hits = engine
        .try_execute(&RelevanceQuery::new(1).vocabulary("topics"))
        .unwrap();
    let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![3, 2]);
}
