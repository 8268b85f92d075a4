//! Path lookup within a tree hierarchy.

use geode_store::{ObjectStore, RevTree};
use geode_types::{path, ObjectId};

use crate::entry::ChildEntry;
use crate::error::TraverseResult;

/// Locate the entry at `child_path` within `root`, descending through
/// intermediate subtrees as needed.
///
/// Returns `Ok(None)` when any segment along the way is missing or when an
/// intermediate segment names a feature instead of a tree. Feature-type
/// descriptor inheritance is applied while descending, so the returned
/// entry's `metadata_id` is the effective one for its location.
pub fn find_tree_child(
    store: &dyn ObjectStore,
    root: &RevTree,
    child_path: &str,
) -> TraverseResult<Option<ChildEntry>> {
    path::validate(child_path)?;

    let segments: Vec<&str> = child_path.split(path::SEPARATOR).collect();
    let mut current = root.clone();
    let mut parent_path = String::new();
    let mut default_metadata = ObjectId::null();

    for (i, segment) in segments.iter().enumerate() {
        let Some(child) = current.get(segment).cloned() else {
            return Ok(None);
        };
        if i == segments.len() - 1 {
            return Ok(Some(ChildEntry::qualify(
                &parent_path,
                &child,
                default_metadata,
            )));
        }
        if !child.kind.is_tree() {
            // A feature in the middle of the path: nothing can live below it.
            return Ok(None);
        }
        if !child.metadata_id.is_null() {
            default_metadata = child.metadata_id;
        }
        current = store.get_tree(&child.id)?;
        parent_path = path::append(&parent_path, segment);
    }

    Ok(None)
}
