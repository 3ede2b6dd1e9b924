//! Page-size variation along the split axis

use super::types::PageGeometry;
use crate::types::{Result, SplitAxis, UnspreadError};

/// Distinct extents observed along one axis, computed once per document
#[derive(Debug, Clone, PartialEq)]
pub struct SizeVariation {
    /// Distinct extents in first-seen order
    pub sizes: Vec<f32>,
    pub min: f32,
    pub max: f32,
}

impl SizeVariation {
    /// Collect height (vertical) or width (horizontal) of every page
    pub fn analyze(pages: &[PageGeometry], axis: SplitAxis) -> Result<Self> {
        let mut sizes: Vec<f32> = Vec::new();
        for page in pages {
            let extent = page.extent(axis);
            if !sizes.contains(&extent) {
                sizes.push(extent);
            }
        }

        if sizes.is_empty() {
            return Err(UnspreadError::NoPages);
        }

        let min = sizes.iter().copied().fold(f32::INFINITY, f32::min);
        let max = sizes.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        Ok(Self { sizes, min, max })
    }

    /// Number of distinct extents
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// A page is already single when the document mixes sizes and this
    /// page has the smallest one. Uniform documents are assumed all-spread.
    pub fn is_minimal(&self, extent: f32) -> bool {
        self.count() > 1 && extent == self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights(values: &[f32]) -> Vec<PageGeometry> {
        values
            .iter()
            .enumerate()
            .map(|(i, &h)| PageGeometry::new(i, 100.0, h))
            .collect()
    }

    #[test]
    fn test_distinct_sizes_in_first_seen_order() {
        let variation =
            SizeVariation::analyze(&heights(&[200.0, 100.0, 200.0, 150.0]), SplitAxis::Vertical)
                .unwrap();
        assert_eq!(variation.sizes, vec![200.0, 100.0, 150.0]);
        assert_eq!(variation.min, 100.0);
        assert_eq!(variation.max, 200.0);
    }

    #[test]
    fn test_axis_selects_dimension() {
        let pages = vec![PageGeometry::new(0, 300.0, 100.0)];
        let horizontal = SizeVariation::analyze(&pages, SplitAxis::Horizontal).unwrap();
        assert_eq!(horizontal.sizes, vec![300.0]);
        let vertical = SizeVariation::analyze(&pages, SplitAxis::Vertical).unwrap();
        assert_eq!(vertical.sizes, vec![100.0]);
    }

    #[test]
    fn test_uniform_document_never_minimal() {
        let variation =
            SizeVariation::analyze(&heights(&[100.0, 100.0]), SplitAxis::Vertical).unwrap();
        assert_eq!(variation.count(), 1);
        assert!(!variation.is_minimal(100.0));
    }

    #[test]
    fn test_mixed_document_minimal() {
        let variation =
            SizeVariation::analyze(&heights(&[100.0, 200.0, 100.0]), SplitAxis::Vertical).unwrap();
        assert!(variation.is_minimal(100.0));
        assert!(!variation.is_minimal(200.0));
    }

    #[test]
    fn test_empty_document() {
        let result = SizeVariation::analyze(&[], SplitAxis::Horizontal);
        assert!(matches!(result, Err(UnspreadError::NoPages)));
    }
}
