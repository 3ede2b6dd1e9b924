//! Embed-and-draw output pages
//!
//! Each view becomes a fresh page the size of the view. The source page is
//! drawn as a Form XObject, shifted so the view's lower-left corner lands
//! on the origin and clipped to the view.

use super::source::SourcePage;
use super::xobject::{CopyCache, embed_page};
use crate::constants::EMBEDDED_PAGE_NAME;
use crate::geometry::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Caches shared by all embed-and-draw pages of one output document
#[derive(Debug, Default)]
pub struct EmbedCache {
    /// Source page ID -> Form XObject
    xobjects: CopyCache,
    /// Source object ID -> copied resource
    resources: CopyCache,
}

/// Render one view of a source page onto a new output page.
///
/// # Arguments
/// * `output` - The output document
/// * `source` - The source document containing the page
/// * `page` - The source page
/// * `view` - Region relative to the media-box origin; `None` draws the whole page
/// * `parent_pages_id` - The parent Pages object ID
/// * `cache` - Embeddings and resources already copied into `output`
pub fn render_embedded_view(
    output: &mut Document,
    source: &Document,
    page: &SourcePage,
    view: Option<&Rect>,
    parent_pages_id: ObjectId,
    cache: &mut EmbedCache,
) -> Result<ObjectId> {
    let geometry = &page.geometry;
    let view = view.copied().unwrap_or(Rect::new(
        0.0,
        0.0,
        geometry.width(),
        geometry.height(),
    ));
    let target = view.offset_by(&geometry.media_box);

    let xobject_id = embed_page(
        output,
        source,
        page,
        &mut cache.xobjects,
        &mut cache.resources,
    )?;

    // Create page dictionary
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(view.width),
            Object::Real(view.height),
        ]),
    );
    if geometry.rotation.degrees() != 0 {
        page_dict.set("Rotate", Object::Integer(geometry.rotation.degrees() as i64));
    }

    let mut xobjects = Dictionary::new();
    xobjects.set(EMBEDDED_PAGE_NAME, Object::Reference(xobject_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = generate_view_command(EMBEDDED_PAGE_NAME, &target);
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Content stream that clips to the view size and draws the XObject shifted
/// by the view's absolute origin.
fn generate_view_command(xobject_name: &str, target: &Rect) -> String {
    format!(
        "q 0 0 {} {} re W n 1 0 0 1 {} {} cm /{} Do Q\n",
        target.width,
        target.height,
        0.0 - target.x,
        0.0 - target.y,
        xobject_name
    )
}
