mod constants;
pub mod geometry;
mod options;
pub mod render;
mod stats;
mod types;
pub mod unspread;

pub use constants::DEFAULT_OUTPUT_SUFFIX;
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
pub use unspread::{
    load_pdf, load_pdf_mem, plan_document, save_pdf, save_pdf_mem, unspread, unspread_document,
};
