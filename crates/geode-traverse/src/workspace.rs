//! Access to the live working snapshot.

use geode_store::StoreResult;
use geode_types::ObjectId;

/// Accessor for the current root tree of the live (uncommitted) working
/// state.
///
/// Passed into the resolver as an explicit collaborator; there is no
/// ambient "current repository" state. The working snapshot is the default
/// traversal root and the fallback lookup base for bare path expressions.
pub trait Workspace: Send + Sync {
    /// Id of the working snapshot's root tree, or the null id when the
    /// working snapshot is empty.
    fn root_tree_id(&self) -> StoreResult<ObjectId>;
}

/// A [`Workspace`] with a fixed root tree id.
///
/// Suitable for tests and for callers that resolve the working root once
/// per operation.
#[derive(Clone, Copy, Debug)]
pub struct StaticWorkspace {
    root: ObjectId,
}

impl StaticWorkspace {
    /// A workspace rooted at `root`.
    pub fn new(root: ObjectId) -> Self {
        Self { root }
    }

    /// An empty workspace (null root).
    pub fn empty() -> Self {
        Self::new(ObjectId::null())
    }
}

impl Workspace for StaticWorkspace {
    fn root_tree_id(&self) -> StoreResult<ObjectId> {
        Ok(self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_workspace_reports_its_root() {
        let root = ObjectId::from_bytes(b"root");
        let ws = StaticWorkspace::new(root);
        assert_eq!(ws.root_tree_id().unwrap(), root);
    }

    #[test]
    fn empty_workspace_has_null_root() {
        assert!(StaticWorkspace::empty().root_tree_id().unwrap().is_null());
    }
}
