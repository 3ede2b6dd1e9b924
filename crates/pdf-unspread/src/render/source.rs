//! Source page geometry, read out of the lopdf page tree
//!
//! `MediaBox`, `CropBox`, `Rotate` and `Resources` are inheritable, so they
//! are looked up through the `/Parent` chain. The other boxes are read from
//! the page itself.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::geometry::{PageGeometry, Rect};
use crate::types::{Result, Rotation, UnspreadError};
use lopdf::{Dictionary, Document, Object, ObjectId};

/// A source page: where it lives in the source document and its geometry
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePage {
    pub id: ObjectId,
    pub geometry: PageGeometry,
}

/// Read every page of a document, in page order
pub fn read_source_pages(doc: &Document) -> Result<Vec<SourcePage>> {
    // get_pages is keyed by 1-based page number, so values are already in order
    doc.get_pages()
        .values()
        .enumerate()
        .map(|(index, &id)| {
            Ok(SourcePage {
                id,
                geometry: read_page_geometry(doc, index, id)?,
            })
        })
        .collect()
}

/// Read the geometry of one page
pub fn read_page_geometry(doc: &Document, index: usize, page_id: ObjectId) -> Result<PageGeometry> {
    let media_box = match inherited_attribute(doc, page_id, b"MediaBox")? {
        Some(obj) => read_rect(doc, obj, index, "MediaBox")?,
        None => Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1),
    };

    let rotation = match inherited_attribute(doc, page_id, b"Rotate")? {
        Some(obj) => {
            let degrees = resolve(doc, obj)?.as_i64().map_err(|_| {
                UnspreadError::geometry(index, "Rotate is not an integer")
            })?;
            Rotation::from_degrees(degrees).ok_or_else(|| {
                UnspreadError::geometry(index, format!("Rotate {} is not a quarter turn", degrees))
            })?
        }
        None => Rotation::None,
    };

    let crop_box = inherited_attribute(doc, page_id, b"CropBox")?
        .map(|obj| read_rect(doc, obj, index, "CropBox"))
        .transpose()?;

    let page_dict = doc.get_dictionary(page_id)?;
    let own_box = |key: &[u8], name: &str| -> Result<Option<Rect>> {
        page_dict
            .get(key)
            .ok()
            .map(|obj| read_rect(doc, obj, index, name))
            .transpose()
    };

    Ok(PageGeometry {
        index,
        rotation,
        media_box,
        crop_box,
        bleed_box: own_box(b"BleedBox", "BleedBox")?,
        trim_box: own_box(b"TrimBox", "TrimBox")?,
        art_box: own_box(b"ArtBox", "ArtBox")?,
    })
}

/// Look a key up on the page, then on each ancestor in the page tree
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut dict: &Dictionary = doc.get_dictionary(page_id)?;
    loop {
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => dict = doc.get_dictionary(*parent_id)?,
            _ => return Ok(None),
        }
    }
}

/// Follow a single level of indirection
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        _ => Ok(obj),
    }
}

/// Parse a box array `[llx lly urx ury]`
fn read_rect(doc: &Document, obj: &Object, index: usize, name: &str) -> Result<Rect> {
    let invalid = || UnspreadError::geometry(index, format!("{} is not a 4-number array", name));

    let array = resolve(doc, obj)?.as_array().map_err(|_| invalid())?;
    if array.len() != 4 {
        return Err(invalid());
    }

    let mut values = [0.0f32; 4];
    for (slot, item) in values.iter_mut().zip(array) {
        *slot = extract_number(resolve(doc, item)?).ok_or_else(invalid)?;
    }

    Ok(Rect::from_corners(values[0], values[1], values[2], values[3]))
}

/// Extract numeric value from a PDF object
pub(crate) fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Box array for a rectangle, in `[llx lly urx ury]` order
pub(crate) fn rect_to_array(rect: &Rect) -> Object {
    Object::Array(vec![
        Object::Real(rect.x),
        Object::Real(rect.y),
        Object::Real(rect.right()),
        Object::Real(rect.top()),
    ])
}
