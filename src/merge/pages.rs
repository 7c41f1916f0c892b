//! Page tree manipulation.
//!
//! This module handles:
//! - Copying inherited page attributes onto the pages themselves
//! - Clearing inheritable attributes off the root node before it adopts pages
//! - Attaching pages to the root page tree node of another document

use std::collections::HashSet;

use lopdf::{Document, Object, ObjectId};

/// Page attributes a page may take from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Ids of the pages of `doc`, in page order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Copy every inheritable attribute a page only gets from an ancestor
/// onto the page itself.
///
/// After this, a page keeps its appearance when moved under a different
/// parent.
pub fn materialize_inherited(doc: &mut Document) -> lopdf::Result<()> {
    for page_id in page_ids(doc) {
        let inherited = inherited_attributes(doc, page_id)?;
        if inherited.is_empty() {
            continue;
        }

        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }
    Ok(())
}

fn inherited_attributes(
    doc: &Document,
    page_id: ObjectId,
) -> lopdf::Result<Vec<(&'static [u8], Object)>> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&'static [u8]> = INHERITABLE
        .into_iter()
        .filter(|key| !page.has(key))
        .collect();

    let mut found = Vec::new();
    let mut visited = HashSet::from([page_id]);
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    // A malformed tree may loop back on itself.
    while let Some(id) = parent {
        if missing.is_empty() || !visited.insert(id) {
            break;
        }
        let Ok(node) = doc.get_dictionary(id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((*key, value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(found)
}

/// Id of the root `Pages` node of `doc`.
pub fn root_pages_id(doc: &Document) -> lopdf::Result<ObjectId> {
    doc.catalog()?.get(b"Pages")?.as_reference()
}

/// Remove the inheritable attributes from the root `Pages` node of `doc`.
///
/// Run [`materialize_inherited`] first. Pages hung under the root afterwards
/// then keep their own values instead of picking up the root's.
pub fn clear_root_inherited(doc: &mut Document) -> lopdf::Result<()> {
    let root_id = root_pages_id(doc)?;
    let root = doc.get_dictionary_mut(root_id)?;
    for key in INHERITABLE {
        root.remove(key);
    }
    Ok(())
}

/// Hang `pages` under the root `Pages` node of `merged`, after its current
/// kids, and point their `Parent` at it.
///
/// The page objects must already be in `merged.objects`.
pub fn append_pages(merged: &mut Document, pages: &[ObjectId]) -> lopdf::Result<()> {
    let pages_id = root_pages_id(merged)?;

    for &page_id in pages {
        merged
            .get_dictionary_mut(page_id)?
            .set("Parent", Object::Reference(pages_id));
    }

    let pages_dict = merged.get_dictionary_mut(pages_id)?;

    let kids = pages_dict.get_mut(b"Kids")?.as_array_mut()?;
    kids.extend(pages.iter().map(|&id| Object::Reference(id)));

    let current_count = pages_dict.get(b"Count")?.as_i64()?;
    pages_dict.set("Count", Object::Integer(current_count + pages.len() as i64));

    Ok(())
}
