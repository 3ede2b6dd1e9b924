//! Clone-and-reframe output pages
//!
//! The source page dictionary is copied into the output document and its
//! media box is rewritten to the view. Crop, bleed, trim and art boxes
//! follow the media box only when they coincided with it; boxes that were
//! set independently are left as they were.

use super::annotations::copy_annotations;
use super::source::{SourcePage, inherited_attribute, rect_to_array};
use super::xobject::{CopyCache, copy_object_deep};
use crate::constants::{CLONE_SKIPPED_KEYS, SECONDARY_BOXES};
use crate::geometry::{PageGeometry, Rect};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Copy a source page into `output`, reframed to `view`.
///
/// Resources go through `cache` and are shared between the copies of one
/// page. Content streams and annotations are copied afresh for every call,
/// so no two output pages alias them. A split view keeps only the
/// annotations that overlap it.
///
/// # Arguments
/// * `output` - The output document
/// * `source` - The source document containing the page
/// * `page` - The source page
/// * `view` - Region relative to the media-box origin; `None` copies the page unmodified
/// * `parent_pages_id` - The parent Pages object ID
/// * `cache` - Resources already copied into `output`
pub fn clone_page_view(
    output: &mut Document,
    source: &Document,
    page: &SourcePage,
    view: Option<&Rect>,
    parent_pages_id: ObjectId,
    cache: &mut CopyCache,
) -> Result<ObjectId> {
    let source_dict = source.get_dictionary(page.id)?;
    let page_id = output.new_object_id();
    let mut page_dict = Dictionary::new();

    for (key, value) in source_dict.iter() {
        if CLONE_SKIPPED_KEYS.contains(&key.as_slice()) {
            continue;
        }
        page_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }

    page_dict.set("Parent", Object::Reference(parent_pages_id));

    // The copy hangs off a new page tree, so inherited values are pinned
    // on the page itself.
    materialize_inherited(output, source, page, &mut page_dict, cache)?;

    if let Ok(contents) = source_dict.get(b"Contents") {
        let mut fresh = CopyCache::new();
        page_dict.set(
            "Contents",
            copy_object_deep(output, source, contents, &mut fresh)?,
        );
    }

    if let Ok(annots) = source_dict.get(b"Annots") {
        let visible = view.map(|v| v.offset_by(&page.geometry.media_box));
        let copies =
            copy_annotations(output, source, annots, page_id, visible.as_ref(), cache)?;
        if let Some(copies) = copies {
            page_dict.set("Annots", copies);
        }
    }

    if let Some(view) = view {
        reframe(&mut page_dict, &page.geometry, view);
    }

    output
        .objects
        .insert(page_id, Object::Dictionary(page_dict));
    Ok(page_id)
}

/// Pin the resolved media box, crop box, rotation and resources on the copy
fn materialize_inherited(
    output: &mut Document,
    source: &Document,
    page: &SourcePage,
    page_dict: &mut Dictionary,
    cache: &mut CopyCache,
) -> Result<()> {
    let geometry = &page.geometry;

    page_dict.set("MediaBox", rect_to_array(&geometry.media_box));

    if let Some(crop_box) = &geometry.crop_box {
        page_dict.set("CropBox", rect_to_array(crop_box));
    }

    if geometry.rotation.degrees() != 0 {
        page_dict.set("Rotate", Object::Integer(geometry.rotation.degrees() as i64));
    } else {
        page_dict.remove(b"Rotate");
    }

    if !page_dict.has(b"Resources") {
        if let Some(resources) = inherited_attribute(source, page.id, b"Resources")? {
            page_dict.set(
                "Resources",
                copy_object_deep(output, source, resources, cache)?,
            );
        }
    }

    Ok(())
}

/// Rewrite the media box to the view, carrying along boxes that coincided with it
fn reframe(page_dict: &mut Dictionary, geometry: &PageGeometry, view: &Rect) {
    let target = view.offset_by(&geometry.media_box);

    for (key, current) in SECONDARY_BOXES.iter().zip(secondary_boxes(geometry)) {
        if current == Some(geometry.media_box) {
            page_dict.set(key.to_vec(), rect_to_array(&target));
        }
    }

    page_dict.set("MediaBox", rect_to_array(&target));
}

/// Secondary boxes in the same order as `SECONDARY_BOXES`
fn secondary_boxes(geometry: &PageGeometry) -> [Option<Rect>; 4] {
    [
        geometry.crop_box,
        geometry.bleed_box,
        geometry.trim_box,
        geometry.art_box,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::source::extract_number;

    fn read_box(dict: &Dictionary, key: &[u8]) -> Option<Rect> {
        let array = dict.get(key).ok()?.as_array().ok()?;
        let v: Vec<f32> = array.iter().filter_map(extract_number).collect();
        Some(Rect::from_corners(v[0], v[1], v[2], v[3]))
    }

    #[test]
    fn test_reframe_moves_coinciding_boxes_only() {
        let mut geometry = PageGeometry::new(0, 200.0, 100.0);
        geometry.media_box = Rect::new(10.0, 10.0, 200.0, 100.0);
        geometry.crop_box = Some(geometry.media_box);
        geometry.trim_box = Some(Rect::new(20.0, 20.0, 180.0, 80.0));

        let mut dict = Dictionary::new();
        dict.set("TrimBox", rect_to_array(&geometry.trim_box.unwrap()));

        reframe(&mut dict, &geometry, &Rect::new(100.0, 0.0, 100.0, 100.0));

        let expected = Rect::new(110.0, 10.0, 100.0, 100.0);
        assert_eq!(read_box(&dict, b"MediaBox"), Some(expected));
        assert_eq!(read_box(&dict, b"CropBox"), Some(expected));
        assert_eq!(read_box(&dict, b"TrimBox"), geometry.trim_box);
        assert_eq!(read_box(&dict, b"BleedBox"), None);
        assert_eq!(read_box(&dict, b"ArtBox"), None);
    }
}
