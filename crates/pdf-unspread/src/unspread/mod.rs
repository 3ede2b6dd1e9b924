//! PDF unspreading - splitting two-up spreads into single pages
//!
//! This module orchestrates the process:
//! 1. Read source page geometry
//! 2. Decide the effective split axis and per-page plans
//! 3. Extract each planned view into a new page
//! 4. Assemble the output document in source order

mod assemble;
mod extract;
mod io;

pub use io::{load_pdf, load_pdf_mem, save_pdf, save_pdf_mem};

use crate::geometry::{DocumentPlan, PageGeometry, plan_pages};
use crate::options::UnspreadOptions;
use crate::render::read_source_pages;
use crate::types::*;
use assemble::DocumentAssembler;
use extract::ViewExtractor;
use lopdf::Document;

/// Main unspread function
pub async fn unspread(document: &Document, options: &UnspreadOptions) -> Result<Document> {
    options.validate()?;

    let document = document.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || unspread_document(&document, &options)).await?
}

/// Split every spread of `source` into a new document.
///
/// Nothing is returned unless every page was planned and extracted.
pub fn unspread_document(source: &Document, options: &UnspreadOptions) -> Result<Document> {
    options.validate()?;

    let pages = read_source_pages(source)?;
    let geometries: Vec<PageGeometry> = pages.iter().map(|p| p.geometry.clone()).collect();
    let plan = plan_pages(&geometries, options)?;

    let mut assembler = DocumentAssembler::new();
    let mut extractor = ViewExtractor::new(options.strategy);

    for (page, page_plan) in pages.iter().zip(&plan.pages) {
        for view in page_plan.plan.views() {
            let parent = assembler.pages_tree_id();
            let page_id = extractor.extract(
                assembler.document_mut(),
                source,
                page,
                view.as_ref(),
                parent,
            )?;
            assembler.push(page_id);
        }
    }

    log::info!(
        "Unspread {} source page(s) into {} page(s), split {:?}{}",
        pages.len(),
        assembler.page_count(),
        plan.axis.axis,
        if plan.axis.flipped {
            " (flipped by page rotation)"
        } else {
            ""
        }
    );

    Ok(assembler.finish())
}

/// Plan every page of `source` without producing any output
pub fn plan_document(source: &Document, options: &UnspreadOptions) -> Result<DocumentPlan> {
    let pages = read_source_pages(source)?;
    let geometries: Vec<PageGeometry> = pages.into_iter().map(|p| p.geometry).collect();
    plan_pages(&geometries, options)
}
