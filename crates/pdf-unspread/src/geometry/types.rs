//! Geometry data types shared by the planning stages

use crate::types::{Result, Rotation, SplitAxis, UnspreadError};

/// A rectangular area in page units
///
/// Equality is exact numeric comparison, which is what box-coincidence
/// checks rely on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from PDF box corners `[llx lly urx ury]`, in either corner order
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Shift by another rectangle's origin
    pub fn offset_by(&self, origin: &Rect) -> Rect {
        Rect::new(origin.x + self.x, origin.y + self.y, self.width, self.height)
    }

    /// Whether the two rectangles share some area; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Extent along an axis: height for vertical splits, width otherwise
    pub fn extent(&self, axis: SplitAxis) -> f32 {
        match axis {
            SplitAxis::Vertical => self.height,
            SplitAxis::Horizontal => self.width,
        }
    }
}

/// Read-only geometry of one source page
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    /// 0-based position in the source document
    pub index: usize,
    /// Normalized `/Rotate` (inherited through the page tree)
    pub rotation: Rotation,
    /// Physical sheet; width and height are read from here
    pub media_box: Rect,
    pub crop_box: Option<Rect>,
    pub bleed_box: Option<Rect>,
    pub trim_box: Option<Rect>,
    pub art_box: Option<Rect>,
}

impl PageGeometry {
    /// A page with only a media box at the origin
    pub fn new(index: usize, width: f32, height: f32) -> Self {
        Self {
            index,
            rotation: Rotation::None,
            media_box: Rect::new(0.0, 0.0, width, height),
            crop_box: None,
            bleed_box: None,
            trim_box: None,
            art_box: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_trim_box(mut self, trim_box: Rect) -> Self {
        self.trim_box = Some(trim_box);
        self
    }

    /// Intrinsic width, before rotation is considered
    pub fn width(&self) -> f32 {
        self.media_box.width
    }

    /// Intrinsic height, before rotation is considered
    pub fn height(&self) -> f32 {
        self.media_box.height
    }

    /// Extent along the split axis
    pub fn extent(&self, axis: SplitAxis) -> f32 {
        self.media_box.extent(axis)
    }

    /// Extent across the split axis
    pub fn cross_extent(&self, axis: SplitAxis) -> f32 {
        self.media_box.extent(axis.flipped())
    }

    /// Reject pages that cannot yield a meaningful output page
    pub fn validate(&self) -> Result<()> {
        let (w, h) = (self.width(), self.height());
        if !w.is_finite() || !h.is_finite() {
            return Err(UnspreadError::geometry(
                self.index,
                format!("non-finite page size {} x {}", w, h),
            ));
        }
        if w <= 0.0 || h <= 0.0 {
            return Err(UnspreadError::geometry(
                self.index,
                format!("degenerate page size {} x {}", w, h),
            ));
        }
        Ok(())
    }
}
