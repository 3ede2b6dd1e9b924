//! Strategy dispatch for producing output views

use crate::geometry::Rect;
use crate::render::{
    CopyCache, EmbedCache, SourcePage, clone_page_view, render_embedded_view,
};
use crate::types::{ExtractStrategy, Result};
use lopdf::{Document, ObjectId};

/// Produces output pages with one strategy for the whole run, holding the
/// copy caches that strategy shares between pages.
pub(crate) enum ViewExtractor {
    Clone(CopyCache),
    Embed(EmbedCache),
}

impl ViewExtractor {
    pub(crate) fn new(strategy: ExtractStrategy) -> Self {
        match strategy {
            ExtractStrategy::CloneAndReframe => ViewExtractor::Clone(CopyCache::new()),
            ExtractStrategy::EmbedAndDraw => ViewExtractor::Embed(EmbedCache::default()),
        }
    }

    /// Add one output page showing `view` of `page` (the whole page for `None`)
    pub(crate) fn extract(
        &mut self,
        output: &mut Document,
        source: &Document,
        page: &SourcePage,
        view: Option<&Rect>,
        parent_pages_id: ObjectId,
    ) -> Result<ObjectId> {
        match self {
            ViewExtractor::Clone(cache) => {
                clone_page_view(output, source, page, view, parent_pages_id, cache)
            }
            ViewExtractor::Embed(cache) => {
                render_embedded_view(output, source, page, view, parent_pages_id, cache)
            }
        }
    }
}
