//! The execute boundary tying extraction and ranking together.

use crate::{
    extract::resolve_term_ids, rank::rank_terms, ContentItem, ContentSource, RelevanceHit,
    RelevanceQuery, Result,
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Default presentation mode for resolved display items.
pub const DEFAULT_VIEW_MODE: &str = "teaser";

/// A result row resolved into its full content item for the rendering
/// layer. The view mode is a display-layer concept passed through opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayItem {
    pub item: ContentItem,
    pub overlap: usize,
    pub view_mode: String,
}

/// Stateless relevance engine over a content source.
///
/// Holds no per-request fields; every call takes the query as an explicit
/// value, so one engine handle can serve unrelated requests concurrently.
pub struct RelevanceEngine<'a> {
    source: &'a dyn ContentSource,
}

impl<'a> RelevanceEngine<'a> {
    #[inline]
    #[must_use]
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self { source }
    }

    /// Resolve the reference item's terms and rank candidates, surfacing
    /// every failure to the caller.
    pub fn try_execute(&self, query: &RelevanceQuery) -> Result<Vec<RelevanceHit>> {
        let reference = query.reference_id().ok_or_else(|| {
            crate::Error::InvalidQuery("no reference content item set".into())
        })?;
        let terms = resolve_term_ids(self.source, reference, query.vocabulary_filter())?;
        rank_terms(self.source, &terms, query)
    }

    /// Execute a query, degrading any failure to an empty result.
    ///
    /// The failure is logged; the caller cannot distinguish a suppressed
    /// error from genuine absence of relevant content, and renders neither.
    pub fn execute(&self, query: &RelevanceQuery) -> Vec<RelevanceHit> {
        match self.try_execute(query) {
            Ok(hits) => hits,
            Err(e) => {
                error!(reference = ?query.reference_id(), "relevance query failed: {e}");
                Vec::new()
            }
        }
    }

    /// Resolve hits into full content-item representations for display.
    ///
    /// Hits whose item has vanished from the source since ranking are
    /// skipped.
    pub fn resolve(
        &self,
        hits: &[RelevanceHit],
        view_mode: Option<&str>,
    ) -> Result<Vec<DisplayItem>> {
        let view_mode = view_mode.unwrap_or(DEFAULT_VIEW_MODE);
        let mut items = Vec::with_capacity(hits.len());
        for hit in hits {
            if let Some(item) = self.source.load(hit.id)? {
                items.push(DisplayItem {
                    item,
                    overlap: hit.overlap,
                    view_mode: view_mode.to_string(),
                });
            }
        }
        Ok(items)
    }
}
