//! Merging finished group documents

use lopdf::{Dictionary, Document, Object, ObjectId};

/// Merge `documents` into one, keeping every page in the given order.
///
/// Object ids are renumbered so the inputs cannot collide. Catalogs and page
/// trees of the inputs are dropped and replaced by a single new tree; an
/// empty input yields a valid document with zero pages.
pub fn merge_documents(documents: Vec<Document>) -> Document {
    let mut output = Document::with_version("1.7");
    let mut max_id: u32 = 1;
    let mut pages: Vec<(ObjectId, Dictionary)> = Vec::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        // get_pages is ordered by page number
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for page_id in &page_ids {
            if let Ok(dict) = doc.get_dictionary(*page_id) {
                pages.push((*page_id, dict.clone()));
            }
        }

        for (object_id, object) in doc.objects {
            if page_ids.contains(&object_id) {
                continue;
            }
            match object.type_name().unwrap_or(b"") {
                b"Catalog" | b"Pages" | b"Outlines" | b"Outline" => {}
                _ => {
                    output.objects.insert(object_id, object);
                }
            }
        }
    }

    output.max_id = max_id;
    let pages_tree_id = output.new_object_id();

    let mut kids = Vec::with_capacity(pages.len());
    for (page_id, mut dict) in pages {
        dict.set("Parent", Object::Reference(pages_tree_id));
        output.objects.insert(page_id, Object::Dictionary(dict));
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    output.objects.insert(
        pages_tree_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ])),
    );

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    output
}
