//! Shared constants for unspreading

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Output
// =============================================================================

/// Suffix inserted before the input's extension to name the output file
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_unspread";

/// PDF version written to the output document
pub const OUTPUT_PDF_VERSION: &str = "1.7";

/// Resource name of the embedded source page in embed-and-draw output
pub const EMBEDDED_PAGE_NAME: &str = "Src";

// =============================================================================
// Page Dictionary Keys
// =============================================================================

/// Boxes rewritten alongside the media box when they coincide with it
pub const SECONDARY_BOXES: [&[u8]; 4] = [b"CropBox", b"BleedBox", b"TrimBox", b"ArtBox"];

/// Page entries not carried over verbatim when a page is cloned.
/// `Parent` is replaced, `Contents` and `Annots` are copied per output page,
/// and beads point back into the source tree.
pub const CLONE_SKIPPED_KEYS: [&[u8]; 4] = [b"Parent", b"Contents", b"Annots", b"B"];
