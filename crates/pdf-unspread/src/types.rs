use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnspreadError {
    #[error("PDF error: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid geometry on page {page}: {reason}")]
    Geometry { page: usize, reason: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to unspread")]
    NoPages,
}

impl UnspreadError {
    /// Geometry error for a 0-based page index (reported 1-based)
    pub(crate) fn geometry(index: usize, reason: impl Into<String>) -> Self {
        UnspreadError::Geometry {
            page: index + 1,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnspreadError>;

/// Direction along which a spread is divided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitAxis {
    /// Split left/right (cut runs top to bottom)
    #[default]
    Horizontal,
    /// Split top/bottom (cut runs left to right)
    Vertical,
}

impl SplitAxis {
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            SplitAxis::Vertical
        } else {
            SplitAxis::Horizontal
        }
    }

    pub fn is_vertical(self) -> bool {
        self == SplitAxis::Vertical
    }

    /// The other axis
    pub fn flipped(self) -> Self {
        match self {
            SplitAxis::Horizontal => SplitAxis::Vertical,
            SplitAxis::Vertical => SplitAxis::Horizontal,
        }
    }
}

/// Page rotation as stored in a page's `/Rotate` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Normalize any multiple of 90 (negative included) into a rotation.
    /// Returns `None` for angles that are not quarter turns.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Clockwise90),
            180 => Some(Rotation::Clockwise180),
            270 => Some(Rotation::Clockwise270),
            _ => None,
        }
    }

    /// Quarter turns swap which physical edge is the long one; a half turn does not.
    pub fn flips_axis(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }
}

/// How each output view is produced from its source page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtractStrategy {
    /// Copy the page object and rewrite its boundary boxes to the view.
    /// Boxes that differ from the media box (a pre-set trim, say) survive.
    #[default]
    CloneAndReframe,
    /// Draw the source page as a Form XObject onto a fresh page of the view size.
    /// Ignores inconsistent source boxes, but only visible geometry survives.
    EmbedAndDraw,
}

/// Statistics about an unspread run
#[derive(Debug, Clone, PartialEq)]
pub struct UnspreadStatistics {
    /// Number of pages in the source document
    pub source_pages: usize,
    /// Number of pages the output document will contain
    pub output_pages: usize,
    /// Source pages divided into two halves
    pub split_pages: usize,
    /// Source pages reduced to their centered middle half
    pub centered_pages: usize,
    /// Source pages copied unmodified
    pub passed_through: usize,
    /// Distinct extents along the effective split axis
    pub distinct_sizes: usize,
    /// Split axis after rotation normalization
    pub effective_axis: SplitAxis,
    /// Whether a quarter-turned page flipped the configured axis
    pub axis_flipped: bool,
}
