//! Output document assembly

use crate::constants::OUTPUT_PDF_VERSION;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Collects output pages in emission order under a single flat page tree
pub(crate) struct DocumentAssembler {
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
}

impl DocumentAssembler {
    pub(crate) fn new() -> Self {
        let mut output = Document::with_version(OUTPUT_PDF_VERSION);
        let pages_tree_id = output.new_object_id();
        Self {
            output,
            pages_tree_id,
            page_refs: Vec::new(),
        }
    }

    /// Parent for every page added to the output
    pub(crate) fn pages_tree_id(&self) -> ObjectId {
        self.pages_tree_id
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.output
    }

    /// Append a page after all pages appended so far
    pub(crate) fn push(&mut self, page_id: ObjectId) {
        self.page_refs.push(Object::Reference(page_id));
    }

    pub(crate) fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Write the page tree and catalog
    pub(crate) fn finish(mut self) -> Document {
        // Create pages tree
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));

        self.output.trailer.set("Root", catalog_id);

        self.output
    }
}
