//! # relevant
//!
//! A fast, in-memory content relevance engine.
//!
//! Given a reference content item, `relevant` finds other items sharing its
//! taxonomy classifications, ranks them by overlap strength and returns a
//! bounded, ordered result set.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install relevant
//! relevant --http-port 6380 --data-dir ./data
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use relevant::prelude::*;
//!
//! // Build the content/taxonomy index
//! let index = ContentIndex::new();
//! index.upsert_vocabulary(Vocabulary::new("topics", "Topics"));
//! index.upsert_term(Term::new(1, "topics"));
//! index.upsert_term(Term::new(2, "topics"));
//! index.upsert(ContentItem::new(1, "article", 1_700_000_000).with_terms([1, 2]));
//! index.upsert(ContentItem::new(2, "article", 1_700_000_100).with_terms([1, 2]));
//! index.upsert(ContentItem::new(3, "recipe", 1_700_000_200).with_terms([2]));
//!
//! // Rank content relevant to item 1
//! let engine = RelevanceEngine::new(&index);
//! let query = RelevanceQuery::new(1).vocabulary("topics").max_results(5);
//! let hits = engine.execute(&query);
//! assert_eq!(hits[0].id, 2); // two shared terms beat one
//! ```
//!
//! ## Crate Structure
//!
//! `relevant` is composed of several crates:
//!
//! - `relevant-core` - The engine: index, tag extraction, overlap ranking
//! - `relevant-storage` - Snapshot persistence and restore
//! - `relevant-api` - REST API for population and queries
//!
//! ## Features
//!
//! - **Inverted term index**: candidate scans touch only referencing items
//! - **Deterministic ordering**: overlap, recency, then id, all descending
//! - **Graceful degradation**: a failed query logs and renders as "no
//!   relevant content", never as a page error
//! - **Snapshot persistence**: atomic on-disk snapshots with restore on boot

// Re-export core types
pub use relevant_core::{
    rank_terms, resolve_term_ids, Candidate, ContentId, ContentIndex, ContentItem, ContentSource,
    DisplayItem, Error, RelevanceEngine, RelevanceHit, RelevanceQuery, Result, Term, TermId,
    Vocabulary, VocabularyId, DEFAULT_MAX_RESULTS, DEFAULT_VIEW_MODE,
};

// Re-export storage
pub use relevant_storage::StorageManager;

// Re-export API
pub use relevant_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Candidate, ContentId, ContentIndex, ContentItem, ContentSource, DisplayItem, Error,
        RelevanceEngine, RelevanceHit, RelevanceQuery, Result, RestApi, StorageManager, Term,
        TermId, Vocabulary, VocabularyId,
    };
}
