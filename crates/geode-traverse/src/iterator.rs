//! The six-strategy lazy tree traversal engine.

use geode_store::{ChildKind, ObjectStore, RevTree, TreeChild};
use geode_types::{Extent, ObjectId};

use crate::entry::ChildEntry;
use crate::error::TraverseResult;

/// What a traversal emits and whether it recurses into subtrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// All direct children of the root tree.
    Children,
    /// Direct children of type feature only.
    FeaturesOnly,
    /// Direct children of type tree only.
    TreesOnly,
    /// The whole subtree, depth first; a tree's entry is emitted
    /// immediately before its own children.
    DepthFirst,
    /// The whole subtree, depth first, emitting features only (trees are
    /// traversed but not reported).
    DepthFirstOnlyFeatures,
    /// The whole subtree, depth first, emitting trees only (features are
    /// skipped without being fetched).
    DepthFirstOnlyTrees,
}

impl Strategy {
    /// Whether this strategy descends into subtrees.
    pub fn is_recursive(&self) -> bool {
        matches!(
            self,
            Self::DepthFirst | Self::DepthFirstOnlyFeatures | Self::DepthFirstOnlyTrees
        )
    }

    /// Whether entries of type tree are reported.
    pub fn emits_trees(&self) -> bool {
        matches!(
            self,
            Self::Children | Self::TreesOnly | Self::DepthFirst | Self::DepthFirstOnlyTrees
        )
    }

    /// Whether entries of type feature are reported.
    pub fn emits_features(&self) -> bool {
        matches!(
            self,
            Self::Children | Self::FeaturesOnly | Self::DepthFirst | Self::DepthFirstOnlyFeatures
        )
    }
}

/// Predicate over an entry's bounding extent.
///
/// Evaluated before an entry is emitted or descended into; an entry whose
/// extent fails the predicate is skipped entirely and its subtree is never
/// fetched. Entries without an extent are never pruned.
pub type BoundsFilter = Box<dyn Fn(&Extent) -> bool>;

/// One element of the traversal stack.
enum Frame {
    /// The children of an already-fetched tree, plus the context needed to
    /// qualify them.
    Level {
        parent_path: String,
        default_metadata: ObjectId,
        children: std::vec::IntoIter<TreeChild>,
    },
    /// A subtree scheduled for descent but not yet fetched. Resolved into a
    /// `Level` only when consumption reaches it, after its own entry has
    /// been yielded.
    Pending {
        path: String,
        metadata_id: ObjectId,
        id: ObjectId,
    },
}

/// A lazy, single-pass, depth-first cursor over a tree's entries.
///
/// Holds an explicit stack of per-level cursors instead of recursing, so
/// tree depth never threatens the call stack, and at most one level's
/// pending children are materialized per depth. Each subtree object is
/// fetched from the store only when consumption reaches it; abandoning the
/// iterator early abandons the remaining fetches too.
///
/// After a store error is yielded the iterator is exhausted; no further
/// entries follow a failure.
pub struct TreeIterator<'a> {
    store: &'a dyn ObjectStore,
    strategy: Strategy,
    bounds_filter: Option<BoundsFilter>,
    stack: Vec<Frame>,
    done: bool,
}

impl<'a> TreeIterator<'a> {
    /// Start a traversal of `root`'s children.
    ///
    /// `root_path` is the path prefix entries are qualified under (`""` when
    /// the root tree is the traversal origin); `metadata_id` is the
    /// descriptor id the root's children inherit.
    pub fn new(
        store: &'a dyn ObjectStore,
        root_path: &str,
        metadata_id: ObjectId,
        root: &RevTree,
        strategy: Strategy,
    ) -> Self {
        Self {
            store,
            strategy,
            bounds_filter: None,
            stack: vec![Frame::Level {
                parent_path: root_path.to_string(),
                default_metadata: metadata_id,
                children: root.children().to_vec().into_iter(),
            }],
            done: false,
        }
    }

    /// Install a spatial bounds filter.
    pub fn with_bounds_filter(mut self, filter: BoundsFilter) -> Self {
        self.bounds_filter = Some(filter);
        self
    }

    /// Returns `true` if `child` survives the bounds filter. Children
    /// without an extent always survive.
    fn passes_bounds(&self, child: &TreeChild) -> bool {
        match (&self.bounds_filter, &child.extent) {
            (Some(filter), Some(extent)) => filter(extent),
            _ => true,
        }
    }
}

impl Iterator for TreeIterator<'_> {
    type Item = TraverseResult<ChildEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            // Resolve a scheduled subtree into a level of children. This is
            // the only place the iterator touches the store.
            if let Some(Frame::Pending { .. }) = self.stack.last() {
                if let Some(Frame::Pending { path, metadata_id, id }) = self.stack.pop() {
                    let subtree = match self.store.get_tree(&id) {
                        Ok(tree) => tree,
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e.into()));
                        }
                    };
                    self.stack.push(Frame::Level {
                        parent_path: path,
                        default_metadata: metadata_id,
                        children: subtree.children().to_vec().into_iter(),
                    });
                }
            }

            let (child, parent_path, default_metadata) = {
                let Some(Frame::Level {
                    parent_path,
                    default_metadata,
                    children,
                }) = self.stack.last_mut()
                else {
                    return None;
                };
                match children.next() {
                    Some(child) => (child, parent_path.clone(), *default_metadata),
                    None => {
                        self.stack.pop();
                        continue;
                    }
                }
            };

            if !self.passes_bounds(&child) {
                continue;
            }

            let entry = ChildEntry::qualify(&parent_path, &child, default_metadata);
            match child.kind {
                ChildKind::Feature => {
                    if self.strategy.emits_features() {
                        return Some(Ok(entry));
                    }
                }
                ChildKind::Tree => {
                    if self.strategy.is_recursive() {
                        // Schedule the descent; the fetch happens after this
                        // entry is observed, so a parent tree is always
                        // yielded before any of its descendants and before
                        // any failure fetching them.
                        self.stack.push(Frame::Pending {
                            path: entry.path.clone(),
                            metadata_id: entry.metadata_id,
                            id: entry.id,
                        });
                    }
                    if self.strategy.emits_trees() {
                        return Some(Ok(entry));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_store::{Feature, InMemoryObjectStore, RevObject, StoreError};

    use crate::error::TraverseError;

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_hash([byte; 32])
    }

    fn write_feature(store: &InMemoryObjectStore, payload: &[u8], extent: Option<Extent>) -> ObjectId {
        store
            .write(&RevObject::Feature(Feature::new(payload.to_vec(), extent)))
            .unwrap()
    }

    /// Fixture tree:
    ///
    /// roads            (tree, metadata M1, extent 0..10)
    ///   highways       (tree, extent 0..5)
    ///     a42          (feature, extent 1..2)
    ///   r5             (feature, metadata M2, extent 8..9)
    /// boundary         (feature, metadata M3, no extent)
    fn fixture(store: &InMemoryObjectStore) -> RevTree {
        let a42 = write_feature(store, b"a42", Some(Extent::new(1.0, 1.0, 2.0, 2.0)));
        let highways = store
            .write(&RevObject::Tree(
                RevTree::new(vec![TreeChild::feature(
                    "a42",
                    a42,
                    ObjectId::null(),
                    Some(Extent::new(1.0, 1.0, 2.0, 2.0)),
                )])
                .unwrap(),
            ))
            .unwrap();
        let r5 = write_feature(store, b"r5", Some(Extent::new(8.0, 8.0, 9.0, 9.0)));
        let roads = store
            .write(&RevObject::Tree(
                RevTree::new(vec![
                    TreeChild::tree(
                        "highways",
                        highways,
                        ObjectId::null(),
                        Some(Extent::new(0.0, 0.0, 5.0, 5.0)),
                    ),
                    TreeChild::feature("r5", r5, oid(20), Some(Extent::new(8.0, 8.0, 9.0, 9.0))),
                ])
                .unwrap(),
            ))
            .unwrap();
        let boundary = write_feature(store, b"bnd", None);
        RevTree::new(vec![
            TreeChild::tree(
                "roads",
                roads,
                oid(10),
                Some(Extent::new(0.0, 0.0, 10.0, 10.0)),
            ),
            TreeChild::feature("boundary", boundary, oid(30), None),
        ])
        .unwrap()
    }

    fn paths(iter: TreeIterator<'_>) -> Vec<String> {
        iter.map(|r| r.unwrap().path).collect()
    }

    #[test]
    fn children_yields_all_direct_children_in_order() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let iter = TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::Children);
        assert_eq!(paths(iter), vec!["roads", "boundary"]);
    }

    #[test]
    fn features_only_yields_feature_subset() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let iter = TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::FeaturesOnly);
        assert_eq!(paths(iter), vec!["boundary"]);
    }

    #[test]
    fn trees_only_yields_tree_subset() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let iter = TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::TreesOnly);
        assert_eq!(paths(iter), vec!["roads"]);
    }

    #[test]
    fn depth_first_emits_parent_before_descendants() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let iter = TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::DepthFirst);
        assert_eq!(
            paths(iter),
            vec![
                "roads",
                "roads/highways",
                "roads/highways/a42",
                "roads/r5",
                "boundary",
            ]
        );
    }

    #[test]
    fn depth_first_features_only_skips_tree_entries() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let iter = TreeIterator::new(
            &store,
            "",
            ObjectId::null(),
            &root,
            Strategy::DepthFirstOnlyFeatures,
        );
        assert_eq!(
            paths(iter),
            vec!["roads/highways/a42", "roads/r5", "boundary"]
        );
    }

    #[test]
    fn depth_first_trees_only_skips_features() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let iter = TreeIterator::new(
            &store,
            "",
            ObjectId::null(),
            &root,
            Strategy::DepthFirstOnlyTrees,
        );
        assert_eq!(paths(iter), vec!["roads", "roads/highways"]);
    }

    #[test]
    fn root_path_prefix_qualifies_entries() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let iter = TreeIterator::new(&store, "base", ObjectId::null(), &root, Strategy::Children);
        assert_eq!(paths(iter), vec!["base/roads", "base/boundary"]);
    }

    #[test]
    fn metadata_inheritance_flows_through_recursion() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let entries: Vec<ChildEntry> =
            TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::DepthFirst)
                .map(|r| r.unwrap())
                .collect();

        let a42 = entries.iter().find(|e| e.path == "roads/highways/a42").unwrap();
        // a42 and highways carry no descriptor of their own; roads' applies.
        assert_eq!(a42.metadata_id, oid(10));

        let r5 = entries.iter().find(|e| e.path == "roads/r5").unwrap();
        assert_eq!(r5.metadata_id, oid(20));
    }

    #[test]
    fn bounds_filter_prunes_subtree_without_fetching_it() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let query = Extent::new(7.0, 7.0, 10.0, 10.0);

        let before = store.read_count();
        let iter = TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::DepthFirst)
            .with_bounds_filter(Box::new(move |e| e.intersects(&query)));
        let got = paths(iter);

        // highways (extent 0..5) fails the filter: neither it nor a42 appear.
        // boundary has no extent and is never pruned.
        assert_eq!(got, vec!["roads", "roads/r5", "boundary"]);

        // Only the roads subtree was fetched; the pruned highways tree was
        // not, and features are never fetched by the iterator at all.
        assert_eq!(store.read_count() - before, 1);
    }

    #[test]
    fn bounds_filter_applies_to_direct_children_too() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let query = Extent::new(50.0, 50.0, 60.0, 60.0);
        let iter = TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::Children)
            .with_bounds_filter(Box::new(move |e| e.intersects(&query)));
        // roads' extent fails; boundary has none and survives.
        assert_eq!(paths(iter), vec!["boundary"]);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let store = InMemoryObjectStore::new();
        let root = RevTree::empty();
        let mut iter =
            TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::DepthFirst);
        assert!(iter.next().is_none());
    }

    #[test]
    fn early_termination_skips_remaining_fetches() {
        let store = InMemoryObjectStore::new();
        let root = fixture(&store);
        let before = store.read_count();
        let mut iter =
            TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::DepthFirst);
        // Taking only the roads entry costs no fetch; its subtree is read
        // when consumption descends into it.
        iter.next().unwrap().unwrap();
        assert_eq!(store.read_count() - before, 0);
        iter.next().unwrap().unwrap(); // roads/highways
        assert_eq!(store.read_count() - before, 1);
        drop(iter);
        assert_eq!(store.read_count() - before, 1);
    }

    #[test]
    fn missing_subtree_yields_error_then_terminates() {
        let store = InMemoryObjectStore::new();
        let good = write_feature(&store, b"ok", None);
        let root = RevTree::new(vec![
            TreeChild::tree("ghost", oid(99), ObjectId::null(), None),
            TreeChild::feature("after", good, ObjectId::null(), None),
        ])
        .unwrap();

        let mut iter =
            TreeIterator::new(&store, "", ObjectId::null(), &root, Strategy::DepthFirst);
        // The ghost tree's own entry is still yielded; the failure surfaces
        // when descending into it.
        assert_eq!(iter.next().unwrap().unwrap().path, "ghost");
        let err = iter.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            TraverseError::Store(StoreError::NotFound(missing)) if missing == oid(99)
        ));
        // The sequence is cleanly terminated; "after" is never yielded.
        assert!(iter.next().is_none());
    }
}
