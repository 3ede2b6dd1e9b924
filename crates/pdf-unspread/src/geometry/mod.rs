//! Spread-splitting geometry
//!
//! Pure calculations over page geometry, no PDF objects involved:
//! - Effective split axis after rotation normalization
//! - Page-size variation and the minimal-size pass-through rule
//! - Trim-box singleton detection
//! - Per-page split plans

mod orientation;
mod plan;
mod singleton;
mod types;
mod variation;

pub use orientation::*;
pub use plan::*;
pub use singleton::*;
pub use types::*;
pub use variation::*;
