//! # relevant Core
//!
//! Core library for the relevant content engine.
//!
//! This crate provides the engine's data structures and algorithms:
//!
//! - [`ContentIndex`] - In-memory content/taxonomy index with an inverted
//!   term index
//! - [`ContentSource`] - Read-capability seam between engine and store
//! - [`RelevanceQuery`] - Fluent, request-scoped query configuration
//! - [`rank_terms`] / [`resolve_term_ids`] - Overlap ranking and tag
//!   extraction
//! - [`RelevanceEngine`] - The execute boundary that degrades failures to
//!   empty results
//!
//! ## Example
//!
//! ```rust
//! use relevant_core::{
//!     ContentIndex, ContentItem, RelevanceEngine, RelevanceQuery, Term, Vocabulary,
//! };
//!
//! let index = ContentIndex::new();
//! index.upsert_vocabulary(Vocabulary::new("topics", "Topics"));
//! index.upsert_term(Term::new(1, "topics"));
//! index.upsert(ContentItem::new(1, "article", 1_700_000_000).with_terms([1]));
//! index.upsert(ContentItem::new(2, "article", 1_700_000_100).with_terms([1]));
//!
//! let engine = RelevanceEngine::new(&index);
//! let query = RelevanceQuery::new(1).vocabulary("topics");
//! let hits = engine.execute(&query);
//! assert_eq!(hits[0].id, 2);
//! ```

pub mod content;
pub mod engine;
pub mod error;
pub mod extract;
pub mod index;
pub mod query;
pub mod rank;
pub mod source;

pub use content::{ContentId, ContentItem, Term, TermId, Vocabulary, VocabularyId};
pub use engine::{DisplayItem, RelevanceEngine, DEFAULT_VIEW_MODE};
pub use error::{Error, Result};
pub use extract::resolve_term_ids;
pub use index::ContentIndex;
pub use query::{RelevanceQuery, DEFAULT_MAX_RESULTS};
pub use rank::{rank_terms, RelevanceHit};
pub use source::{Candidate, ContentSource};
