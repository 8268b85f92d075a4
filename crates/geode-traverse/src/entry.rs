use serde::{Deserialize, Serialize};

use geode_store::{ChildKind, TreeChild};
use geode_types::{path, Extent, ObjectId};

/// A fully qualified traversal result.
///
/// Unlike a raw [`TreeChild`], a `ChildEntry` carries provenance: the full
/// path from the traversal root, the parent path, and the *effective*
/// feature-type descriptor id after inheritance (a child with a null
/// `metadata_id` takes its enclosing tree's). This is the unit returned to
/// traversal consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildEntry {
    /// Full slash-separated path from the traversal root.
    pub path: String,
    /// Path of the tree this entry was found in (`""` for the root).
    pub parent_path: String,
    /// Id of the referenced tree or feature object.
    pub id: ObjectId,
    /// Effective feature-type descriptor id; null when none applies.
    pub metadata_id: ObjectId,
    /// Whether the entry is a subtree or a leaf feature.
    pub kind: ChildKind,
    /// Bounding extent of the referenced object, when known.
    pub extent: Option<Extent>,
}

impl ChildEntry {
    /// Qualify a raw tree child found under `parent_path`.
    ///
    /// `default_metadata` is the descriptor id inherited from the enclosing
    /// tree; it applies when the child carries none of its own.
    pub fn qualify(parent_path: &str, child: &TreeChild, default_metadata: ObjectId) -> Self {
        let metadata_id = if child.metadata_id.is_null() {
            default_metadata
        } else {
            child.metadata_id
        };
        Self {
            path: path::append(parent_path, &child.name),
            parent_path: parent_path.to_string(),
            id: child.id,
            metadata_id,
            kind: child.kind,
            extent: child.extent,
        }
    }

    /// The entry's own name (final path segment).
    pub fn name(&self) -> &str {
        path::name(&self.path)
    }
}
