//! Document I/O operations for unspreading

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || load_pdf_mem(&bytes)).await??;
    Ok(doc)
}

/// Parse a PDF document from memory
pub fn load_pdf_mem(bytes: &[u8]) -> Result<Document> {
    Ok(Document::load_mem(bytes)?)
}

/// Save the unspread document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || save_pdf_mem(doc)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Serialize a document to bytes
pub fn save_pdf_mem(mut doc: Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}
