//! Effective split axis after rotation normalization
//!
//! The decision is made once per document: if any page is quarter-turned,
//! the configured axis is flipped for every page. Documents mixing rotated
//! and unrotated pages therefore get one interpretation for all pages.

use super::types::PageGeometry;
use crate::types::SplitAxis;

/// Axis used for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDecision {
    /// Axis the planner splits along
    pub axis: SplitAxis,
    /// Whether a quarter-turned page flipped the configured axis
    pub flipped: bool,
}

impl AxisDecision {
    /// Vertical splits list the upper half first, which is the reverse of
    /// the raw `[0, half]` offset order. This holds for the effective axis,
    /// so a quarter-turned document orders its halves like an upright one
    /// configured vertical.
    pub fn reverses_offsets(&self) -> bool {
        self.axis.is_vertical()
    }
}

/// Derive the effective axis from the configured one and the page rotations
pub fn effective_axis(configured: SplitAxis, pages: &[PageGeometry]) -> AxisDecision {
    let flipped = pages.iter().any(|page| page.rotation.flips_axis());
    let axis = if flipped {
        configured.flipped()
    } else {
        configured
    };
    AxisDecision { axis, flipped }
}

/// True when quarter-turned pages share the document with pages that are not
pub fn has_mixed_rotation(pages: &[PageGeometry]) -> bool {
    let turned = pages.iter().filter(|p| p.rotation.flips_axis()).count();
    turned > 0 && turned < pages.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    fn pages(rotations: &[Rotation]) -> Vec<PageGeometry> {
        rotations
            .iter()
            .enumerate()
            .map(|(i, &r)| PageGeometry::new(i, 200.0, 100.0).with_rotation(r))
            .collect()
    }

    #[test]
    fn test_unrotated_keeps_axis() {
        let decision = effective_axis(SplitAxis::Horizontal, &pages(&[Rotation::None; 3]));
        assert_eq!(decision.axis, SplitAxis::Horizontal);
        assert!(!decision.flipped);
    }

    #[test]
    fn test_half_turn_does_not_flip() {
        let decision = effective_axis(SplitAxis::Vertical, &pages(&[Rotation::Clockwise180]));
        assert_eq!(decision.axis, SplitAxis::Vertical);
        assert!(!decision.flipped);
    }

    #[test]
    fn test_quarter_turns_flip() {
        for rotation in [Rotation::Clockwise90, Rotation::Clockwise270] {
            let decision = effective_axis(SplitAxis::Horizontal, &pages(&[rotation]));
            assert_eq!(decision.axis, SplitAxis::Vertical);
            assert!(decision.flipped);
        }
    }

    #[test]
    fn test_single_rotated_page_flips_whole_document() {
        let doc = pages(&[Rotation::None, Rotation::Clockwise90, Rotation::None]);
        let decision = effective_axis(SplitAxis::Vertical, &doc);
        assert_eq!(decision.axis, SplitAxis::Horizontal);
        assert!(has_mixed_rotation(&doc));
    }

    #[test]
    fn test_offset_reversal_follows_effective_axis() {
        let unflipped = effective_axis(SplitAxis::Vertical, &pages(&[Rotation::None]));
        assert!(unflipped.reverses_offsets());

        let flipped = effective_axis(SplitAxis::Horizontal, &pages(&[Rotation::Clockwise90]));
        assert_eq!(flipped.axis, SplitAxis::Vertical);
        assert!(flipped.reverses_offsets());

        let flipped_to_horizontal =
            effective_axis(SplitAxis::Vertical, &pages(&[Rotation::Clockwise270]));
        assert_eq!(flipped_to_horizontal.axis, SplitAxis::Horizontal);
        assert!(!flipped_to_horizontal.reverses_offsets());

        let horizontal = effective_axis(SplitAxis::Horizontal, &pages(&[Rotation::None]));
        assert!(!horizontal.reverses_offsets());
    }
}
