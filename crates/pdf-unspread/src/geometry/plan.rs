//! Per-page split planning
//!
//! Rules, first match wins:
//! 1. First page with `centered_top` or last page with `centered_last`:
//!    keep the centered middle half.
//! 2. Mixed-size document and the page has the minimum extent: pass through.
//! 3. `detect_singletons` and the trim box covers under half the sheet:
//!    keep the centered middle half.
//! 4. Otherwise split into two halves.
//!
//! All offsets and sizes are floored to whole units; on odd extents the two
//! halves fall one unit short of the full extent.

use super::orientation::{AxisDecision, effective_axis, has_mixed_rotation};
use super::singleton::is_singleton;
use super::types::{PageGeometry, Rect};
use super::variation::SizeVariation;
use crate::options::UnspreadOptions;
use crate::types::{Result, SplitAxis, UnspreadError};

/// What to emit for one source page. Rectangles are relative to the
/// page's media-box origin.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitPlan {
    /// Copy the page unmodified
    PassThrough,
    /// Keep one view: the middle half along the split axis
    CenteredSingle(Rect),
    /// Two views, in emission order
    TwoWay([Rect; 2]),
}

impl SplitPlan {
    /// Views in emission order; `None` stands for the whole, unmodified page
    pub fn views(&self) -> Vec<Option<Rect>> {
        match self {
            SplitPlan::PassThrough => vec![None],
            SplitPlan::CenteredSingle(rect) => vec![Some(*rect)],
            SplitPlan::TwoWay([first, second]) => vec![Some(*first), Some(*second)],
        }
    }

    /// Number of output pages this plan produces
    pub fn output_count(&self) -> usize {
        match self {
            SplitPlan::PassThrough | SplitPlan::CenteredSingle(_) => 1,
            SplitPlan::TwoWay(_) => 2,
        }
    }
}

/// Which rule produced a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanReason {
    CenteredTop,
    CenteredLast,
    MinimalSize,
    Singleton,
    Spread,
}

/// Plan for one source page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// 0-based source page index
    pub index: usize,
    pub plan: SplitPlan,
    pub reason: PlanReason,
}

/// Plans for a whole document, with the document-wide facts they were derived from
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub axis: AxisDecision,
    pub variation: SizeVariation,
    pub pages: Vec<PagePlan>,
}

impl DocumentPlan {
    /// Total number of output pages
    pub fn output_count(&self) -> usize {
        self.pages.iter().map(|p| p.plan.output_count()).sum()
    }
}

/// Plans pages against document-wide facts computed once up front
#[derive(Debug, Clone)]
pub struct SplitPlanner<'a> {
    options: &'a UnspreadOptions,
    axis: AxisDecision,
    variation: SizeVariation,
    last_index: usize,
}

impl<'a> SplitPlanner<'a> {
    pub fn new(pages: &[PageGeometry], options: &'a UnspreadOptions) -> Result<Self> {
        if pages.is_empty() {
            return Err(UnspreadError::NoPages);
        }

        let axis = effective_axis(options.configured_axis(), pages);
        if axis.flipped && has_mixed_rotation(pages) {
            log::warn!(
                "Document mixes quarter-turned and upright pages; splitting all pages {:?}",
                axis.axis
            );
        }

        let variation = SizeVariation::analyze(pages, axis.axis)?;

        Ok(Self {
            options,
            axis,
            variation,
            last_index: pages.len() - 1,
        })
    }

    pub fn axis(&self) -> AxisDecision {
        self.axis
    }

    pub fn variation(&self) -> &SizeVariation {
        &self.variation
    }

    /// Decide what to emit for one page
    pub fn plan(&self, page: &PageGeometry) -> Result<PagePlan> {
        page.validate()?;

        let axis = self.axis.axis;
        let extent = page.extent(axis);

        let (plan, reason) = if page.index == 0 && self.options.centered_top {
            (
                SplitPlan::CenteredSingle(centered_rect(page, axis)?),
                PlanReason::CenteredTop,
            )
        } else if page.index == self.last_index && self.options.centered_last {
            (
                SplitPlan::CenteredSingle(centered_rect(page, axis)?),
                PlanReason::CenteredLast,
            )
        } else if self.variation.is_minimal(extent) {
            log::info!("SKIP: page {} is minimal size.", page.index + 1);
            (SplitPlan::PassThrough, PlanReason::MinimalSize)
        } else if self.options.detect_singletons && is_singleton(page, axis) {
            log::info!("SINGLE: page {} trim box is under half the sheet.", page.index + 1);
            (
                SplitPlan::CenteredSingle(centered_rect(page, axis)?),
                PlanReason::Singleton,
            )
        } else {
            (
                SplitPlan::TwoWay(halves(page, self.axis, self.options.opposite)?),
                PlanReason::Spread,
            )
        };

        log::debug!("page {}: {:?} -> {:?}", page.index + 1, reason, plan);

        Ok(PagePlan {
            index: page.index,
            plan,
            reason,
        })
    }
}

/// Plan every page of a document
pub fn plan_pages(pages: &[PageGeometry], options: &UnspreadOptions) -> Result<DocumentPlan> {
    let planner = SplitPlanner::new(pages, options)?;
    let plans = pages
        .iter()
        .map(|page| planner.plan(page))
        .collect::<Result<Vec<_>>>()?;

    Ok(DocumentPlan {
        axis: planner.axis(),
        variation: planner.variation().clone(),
        pages: plans,
    })
}

/// Rectangle at `offset` with `size` along the axis, spanning `cross` across it
fn along(axis: SplitAxis, offset: f32, size: f32, cross: f32) -> Rect {
    match axis {
        SplitAxis::Vertical => Rect::new(0.0, offset, cross, size),
        SplitAxis::Horizontal => Rect::new(offset, 0.0, size, cross),
    }
}

fn half_extent(page: &PageGeometry, axis: SplitAxis) -> Result<f32> {
    let half = (page.extent(axis) / 2.0).floor();
    if half <= 0.0 {
        return Err(UnspreadError::geometry(
            page.index,
            format!("extent {} is too small to halve", page.extent(axis)),
        ));
    }
    Ok(half)
}

/// Middle half along the axis: offset floor(E/4), size floor(E/2)
fn centered_rect(page: &PageGeometry, axis: SplitAxis) -> Result<Rect> {
    let half = half_extent(page, axis)?;
    let quadrant = (page.extent(axis) / 4.0).floor();
    Ok(along(axis, quadrant, half, page.cross_extent(axis)))
}

/// Two halves at offsets {0, floor(E/2)} in emission order
fn halves(page: &PageGeometry, decision: AxisDecision, opposite: bool) -> Result<[Rect; 2]> {
    let axis = decision.axis;
    let half = half_extent(page, axis)?;
    let cross = page.cross_extent(axis);

    let mut offsets = [0.0, half];
    if decision.reverses_offsets() {
        offsets.reverse();
    }
    if opposite {
        offsets.reverse();
    }

    Ok(offsets.map(|offset| along(axis, offset, half, cross)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    fn uniform(count: usize, width: f32, height: f32) -> Vec<PageGeometry> {
        (0..count)
            .map(|i| PageGeometry::new(i, width, height))
            .collect()
    }

    fn plan_all(pages: &[PageGeometry], options: &UnspreadOptions) -> Vec<SplitPlan> {
        plan_pages(pages, options)
            .unwrap()
            .pages
            .into_iter()
            .map(|p| p.plan)
            .collect()
    }

    #[test]
    fn test_horizontal_split_left_first() {
        let plans = plan_all(&uniform(1, 200.0, 100.0), &UnspreadOptions::default());
        assert_eq!(
            plans[0],
            SplitPlan::TwoWay([
                Rect::new(0.0, 0.0, 100.0, 100.0),
                Rect::new(100.0, 0.0, 100.0, 100.0),
            ])
        );
    }

    #[test]
    fn test_horizontal_opposite() {
        let options = UnspreadOptions {
            opposite: true,
            ..Default::default()
        };
        let plans = plan_all(&uniform(1, 200.0, 100.0), &options);
        assert_eq!(
            plans[0],
            SplitPlan::TwoWay([
                Rect::new(100.0, 0.0, 100.0, 100.0),
                Rect::new(0.0, 0.0, 100.0, 100.0),
            ])
        );
    }

    #[test]
    fn test_vertical_split_top_first() {
        let options = UnspreadOptions {
            vertical: true,
            ..Default::default()
        };
        let plans = plan_all(&uniform(1, 100.0, 200.0), &options);
        assert_eq!(
            plans[0],
            SplitPlan::TwoWay([
                Rect::new(0.0, 100.0, 100.0, 100.0),
                Rect::new(0.0, 0.0, 100.0, 100.0),
            ])
        );
    }

    #[test]
    fn test_vertical_opposite_bottom_first() {
        let options = UnspreadOptions {
            vertical: true,
            opposite: true,
            ..Default::default()
        };
        let plans = plan_all(&uniform(1, 100.0, 200.0), &options);
        let SplitPlan::TwoWay([first, second]) = plans[0] else {
            panic!("expected a two-way split");
        };
        assert_eq!(first.y, 0.0);
        assert_eq!(second.y, 100.0);
    }

    #[test]
    fn test_rotated_document_orders_like_upright_vertical() {
        let rotated: Vec<_> = uniform(1, 100.0, 200.0)
            .into_iter()
            .map(|p| p.with_rotation(Rotation::Clockwise90))
            .collect();
        let rotated_plans = plan_all(&rotated, &UnspreadOptions::default());

        let vertical = UnspreadOptions {
            vertical: true,
            ..Default::default()
        };
        let upright_plans = plan_all(&uniform(1, 100.0, 200.0), &vertical);

        assert_eq!(
            rotated_plans[0],
            SplitPlan::TwoWay([
                Rect::new(0.0, 100.0, 100.0, 100.0),
                Rect::new(0.0, 0.0, 100.0, 100.0),
            ])
        );
        assert_eq!(rotated_plans, upright_plans);
    }

    #[test]
    fn test_rotated_document_opposite_bottom_first() {
        let rotated: Vec<_> = uniform(1, 100.0, 200.0)
            .into_iter()
            .map(|p| p.with_rotation(Rotation::Clockwise270))
            .collect();
        let options = UnspreadOptions {
            opposite: true,
            ..Default::default()
        };
        let SplitPlan::TwoWay([first, second]) = plan_all(&rotated, &options)[0] else {
            panic!("expected a two-way split");
        };
        assert_eq!(first.y, 0.0);
        assert_eq!(second.y, 100.0);
    }

    #[test]
    fn test_planner_exposes_document_facts() {
        let pages = vec![
            PageGeometry::new(0, 100.0, 100.0),
            PageGeometry::new(1, 200.0, 100.0).with_rotation(Rotation::Clockwise90),
        ];
        let options = UnspreadOptions::default();
        let planner = SplitPlanner::new(&pages, &options).unwrap();
        assert_eq!(planner.axis().axis, SplitAxis::Vertical);
        assert!(planner.axis().flipped);
        assert_eq!(planner.variation().sizes, vec![100.0]);
    }

    #[test]
    fn test_odd_extent_floors_halves() {
        let plans = plan_all(&uniform(1, 201.0, 100.0), &UnspreadOptions::default());
        let SplitPlan::TwoWay([first, second]) = plans[0] else {
            panic!("expected a two-way split");
        };
        assert_eq!(first.x, 0.0);
        assert_eq!(second.x, 100.0);
        assert_eq!(first.width, 100.0);
        assert_eq!(second.width, 100.0);
        assert!((201.0 - (first.width + second.width)) <= 1.0);
    }

    #[test]
    fn test_centered_top_on_single_page() {
        let options = UnspreadOptions {
            vertical: true,
            centered_top: true,
            centered_last: true,
            ..Default::default()
        };
        let plan = plan_pages(&uniform(1, 200.0, 100.0), &options).unwrap();
        assert_eq!(plan.pages[0].reason, PlanReason::CenteredTop);
        assert_eq!(
            plan.pages[0].plan,
            SplitPlan::CenteredSingle(Rect::new(0.0, 25.0, 200.0, 50.0))
        );
    }

    #[test]
    fn test_centered_last_horizontal() {
        let options = UnspreadOptions {
            centered_last: true,
            ..Default::default()
        };
        let plan = plan_pages(&uniform(3, 202.0, 100.0), &options).unwrap();
        assert_eq!(plan.pages[0].reason, PlanReason::Spread);
        assert_eq!(plan.pages[2].reason, PlanReason::CenteredLast);
        assert_eq!(
            plan.pages[2].plan,
            SplitPlan::CenteredSingle(Rect::new(50.0, 0.0, 101.0, 100.0))
        );
    }

    #[test]
    fn test_minimal_pages_pass_through() {
        let options = UnspreadOptions {
            vertical: true,
            ..Default::default()
        };
        let pages = vec![
            PageGeometry::new(0, 200.0, 100.0),
            PageGeometry::new(1, 200.0, 200.0),
            PageGeometry::new(2, 200.0, 100.0),
        ];
        let plan = plan_pages(&pages, &options).unwrap();
        assert_eq!(plan.variation.sizes, vec![100.0, 200.0]);
        assert_eq!(plan.pages[0].plan, SplitPlan::PassThrough);
        assert_eq!(plan.pages[2].plan, SplitPlan::PassThrough);
        assert_eq!(plan.pages[1].plan.output_count(), 2);
        assert_eq!(plan.output_count(), 4);
    }

    #[test]
    fn test_centered_top_wins_over_minimal() {
        let options = UnspreadOptions {
            centered_top: true,
            ..Default::default()
        };
        let pages = vec![
            PageGeometry::new(0, 100.0, 100.0),
            PageGeometry::new(1, 200.0, 100.0),
        ];
        let plan = plan_pages(&pages, &options).unwrap();
        assert_eq!(plan.pages[0].reason, PlanReason::CenteredTop);
    }

    #[test]
    fn test_singleton_detection_is_opt_in() {
        let pages = vec![
            PageGeometry::new(0, 200.0, 100.0).with_trim_box(Rect::new(60.0, 0.0, 80.0, 100.0)),
        ];

        let plan = plan_pages(&pages, &UnspreadOptions::default()).unwrap();
        assert_eq!(plan.pages[0].reason, PlanReason::Spread);

        let options = UnspreadOptions {
            detect_singletons: true,
            ..Default::default()
        };
        let plan = plan_pages(&pages, &options).unwrap();
        assert_eq!(plan.pages[0].reason, PlanReason::Singleton);
        assert_eq!(
            plan.pages[0].plan,
            SplitPlan::CenteredSingle(Rect::new(50.0, 0.0, 100.0, 100.0))
        );
    }

    #[test]
    fn test_degenerate_page_is_an_error() {
        let pages = vec![PageGeometry::new(0, 0.0, 100.0)];
        let result = plan_pages(&pages, &UnspreadOptions::default());
        assert!(matches!(result, Err(UnspreadError::Geometry { page: 1, .. })));
    }

    #[test]
    fn test_unit_extent_cannot_be_halved() {
        let pages = vec![PageGeometry::new(0, 1.0, 100.0)];
        let result = plan_pages(&pages, &UnspreadOptions::default());
        assert!(matches!(result, Err(UnspreadError::Geometry { .. })));
    }

    #[test]
    fn test_empty_document() {
        let result = plan_pages(&[], &UnspreadOptions::default());
        assert!(matches!(result, Err(UnspreadError::NoPages)));
    }
}
