//! XObject creation and object copying
//!
//! Source pages are turned into Form XObjects which are then drawn onto
//! fresh output pages. Everything a page refers to is deep-copied into
//! the output document so it shares nothing with the source.

use super::source::{SourcePage, inherited_attribute, rect_to_array};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Map from source object IDs to their copies in the output document
pub type CopyCache = HashMap<ObjectId, ObjectId>;

// =============================================================================
// XObject Creation
// =============================================================================

/// Embed a source page as a Form XObject.
///
/// The XObject spans the page's whole media box, so one embedding serves
/// every view taken from that page. Results are cached per source page.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `page` - The source page to embed
/// * `xobjects` - Already-embedded pages, keyed by source page ID
/// * `cache` - Cache to avoid copying the same resource multiple times
pub fn embed_page(
    output: &mut Document,
    source: &Document,
    page: &SourcePage,
    xobjects: &mut CopyCache,
    cache: &mut CopyCache,
) -> Result<ObjectId> {
    if let Some(&xobject_id) = xobjects.get(&page.id) {
        return Ok(xobject_id);
    }

    let page_dict = source.get_dictionary(page.id)?;
    let content_data = get_page_content(source, page_dict)?;

    // Create XObject dictionary
    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", rect_to_array(&page.geometry.media_box));
    xobject_dict.set("FormType", Object::Integer(1));

    // Resources may be inherited from the page tree
    if let Some(resources) = inherited_attribute(source, page.id, b"Resources")? {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    let xobject_id = output.add_object(Stream::new(xobject_dict, content_data));
    xobjects.insert(page.id, xobject_id);
    Ok(xobject_id)
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match contents {
        Object::Reference(id) => match doc.get_object(*id)? {
            // An indirect array of stream references
            Object::Array(arr) => get_concatenated_content_streams(doc, arr),
            _ => get_single_content_stream(doc, *id),
        },
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Get content from a single content stream reference.
///
/// The XObject carries no `/Filter`, so encoded content that cannot be
/// decoded is an error rather than raw bytes.
fn get_single_content_stream(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    match doc.get_object(id)?.as_stream() {
        Ok(stream) if stream.dict.has(b"Filter") => Ok(stream.decompressed_content()?),
        Ok(stream) => Ok(stream.content.clone()),
        Err(_) => Ok(Vec::new()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            result.extend_from_slice(&get_single_content_stream(doc, *id)?);
            result.push(b'\n');
        }
    }

    Ok(result)
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times. The output
/// ID is reserved before recursing, so reference cycles terminate.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut CopyCache,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            // Check cache first
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut CopyCache,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UnspreadError;

    fn add_stream(doc: &mut Document, dict: Dictionary, content: &[u8]) -> ObjectId {
        doc.add_object(Stream::new(dict, content.to_vec()))
    }

    #[test]
    fn test_unfiltered_stream_is_raw() {
        let mut doc = Document::with_version("1.7");
        let id = add_stream(&mut doc, Dictionary::new(), b"q Q");
        assert_eq!(get_single_content_stream(&doc, id).unwrap(), b"q Q".to_vec());
    }

    #[test]
    fn test_flate_stream_is_decoded() {
        let content = b"0 0 m 100 100 l S\n".repeat(20);
        let mut stream = Stream::new(Dictionary::new(), content.clone());
        stream.compress().unwrap();
        assert!(stream.dict.has(b"Filter"));

        let mut doc = Document::with_version("1.7");
        let id = doc.add_object(stream);
        assert_eq!(get_single_content_stream(&doc, id).unwrap(), content);
    }

    #[test]
    fn test_undecodable_stream_is_an_error() {
        let mut doc = Document::with_version("1.7");
        let dict = Dictionary::from_iter(vec![(
            "Filter",
            Object::Name(b"RunLengthDecode".to_vec()),
        )]);
        let id = add_stream(&mut doc, dict, b"\x02abc\x80");

        let result = get_single_content_stream(&doc, id);
        assert!(matches!(result, Err(UnspreadError::Parse(_))));
    }
}
