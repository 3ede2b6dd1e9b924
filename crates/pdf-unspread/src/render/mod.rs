//! PDF rendering modules for unspreading
//!
//! This module handles all PDF-specific operations:
//! - Reading source page geometry out of the page tree
//! - Cloning and reframing source pages, with their annotations
//! - Creating XObjects from source pages and drawing them onto fresh pages
//! - Deep copying PDF objects

mod annotations;
mod clone;
mod page;
mod source;
mod xobject;

pub use clone::clone_page_view;
pub use page::{EmbedCache, render_embedded_view};
pub use source::{SourcePage, read_page_geometry, read_source_pages};
pub use xobject::{CopyCache, copy_object_deep, embed_page};
