//! Trim-box heuristic for pages that are already single

use super::types::PageGeometry;
use crate::types::SplitAxis;

/// A page is single when its trim box covers less than half of the
/// media box along the split axis. Pages without a trim box never are.
pub fn is_singleton(page: &PageGeometry, axis: SplitAxis) -> bool {
    match page.trim_box {
        Some(trim) => trim.extent(axis) < page.extent(axis) / 2.0,
        None => false,
    }
}
