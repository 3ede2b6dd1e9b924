//! Annotation copies for cloned pages
//!
//! An annotation points back at its page through `/P`, and links may target
//! other pages through `/Dest` or a `/GoTo` action. Copied as-is, either would
//! drag the source page tree into the output, so `/P` is rebound to the new
//! page and page-targeted links are dropped.

use super::source::{extract_number, resolve};
use super::xobject::{CopyCache, copy_object_deep};
use crate::geometry::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Keys linking an annotation to its page or to other annotations
const LINK_KEYS: [&[u8]; 3] = [b"P", b"Popup", b"Parent"];

/// Copy a page's `/Annots` for the output page `page_id`.
///
/// With `visible` set, only annotations overlapping that area are kept;
/// annotations without a readable `/Rect` are always kept. Returns `None`
/// when nothing is left.
pub(crate) fn copy_annotations(
    output: &mut Document,
    source: &Document,
    annots: &Object,
    page_id: ObjectId,
    visible: Option<&Rect>,
    cache: &mut CopyCache,
) -> Result<Option<Object>> {
    let Ok(entries) = resolve(source, annots)?.as_array() else {
        return Ok(None);
    };

    let mut copies = Vec::new();
    for entry in entries {
        let Ok(annot) = resolve(source, entry)?.as_dict() else {
            continue;
        };

        let shown = match (visible, annotation_rect(source, annot)) {
            (Some(area), Some(rect)) => rect.overlaps(area),
            _ => true,
        };
        if !shown {
            continue;
        }

        let copy = copy_annotation(output, source, annot, page_id, cache)?;
        copies.push(Object::Reference(output.add_object(copy)));
    }

    if copies.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Object::Array(copies)))
    }
}

fn copy_annotation(
    output: &mut Document,
    source: &Document,
    annot: &Dictionary,
    page_id: ObjectId,
    cache: &mut CopyCache,
) -> Result<Dictionary> {
    let mut copy = Dictionary::new();
    for (key, value) in annot.iter() {
        if LINK_KEYS.contains(&key.as_slice()) {
            continue;
        }
        if targets_page(source, key, value) {
            log::debug!(
                "Dropping {} of annotation: it targets a source page",
                String::from_utf8_lossy(key)
            );
            continue;
        }
        copy.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    copy.set("P", Object::Reference(page_id));
    Ok(copy)
}

/// `/Dest` or a `/GoTo`-style action whose destination is a page of this document
fn targets_page(source: &Document, key: &[u8], value: &Object) -> bool {
    match key {
        b"Dest" => is_page_destination(source, value),
        b"A" => match resolve(source, value).ok().and_then(|a| a.as_dict().ok()) {
            Some(action) => action
                .get(b"D")
                .is_ok_and(|dest| is_page_destination(source, dest)),
            None => false,
        },
        _ => false,
    }
}

/// Explicit destinations are arrays starting with a page reference.
/// Named destinations and remote page numbers do not count.
fn is_page_destination(source: &Document, dest: &Object) -> bool {
    let Ok(dest) = resolve(source, dest) else {
        return false;
    };
    match dest.as_array() {
        Ok(array) => matches!(array.first(), Some(Object::Reference(id)) if is_page(source, *id)),
        Err(_) => false,
    }
}

fn is_page(source: &Document, id: ObjectId) -> bool {
    source.get_dictionary(id).is_ok_and(|dict| {
        dict.get(b"Type")
            .and_then(Object::as_name)
            .is_ok_and(|name| name == b"Page")
    })
}

fn annotation_rect(source: &Document, annot: &Dictionary) -> Option<Rect> {
    let array = resolve(source, annot.get(b"Rect").ok()?).ok()?.as_array().ok()?;
    let values: Vec<f32> = array.iter().filter_map(extract_number).collect();
    match values[..] {
        [x0, y0, x1, y1] => Some(Rect::from_corners(x0, y0, x1, y1)),
        _ => None,
    }
}
