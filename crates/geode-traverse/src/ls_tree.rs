//! The `ls-tree` operation: resolve a reference expression and stream the
//! contents of the tree (or the single entry) it names.

use tracing::debug;

use geode_refs::{Ref, RefStore, WORK_HEAD};
use geode_store::{ObjectStore, RevObject, RevTree};
use geode_types::{path, ObjectId};

use crate::entry::ChildEntry;
use crate::error::{TraverseError, TraverseResult};
use crate::find::find_tree_child;
use crate::iterator::{BoundsFilter, Strategy, TreeIterator};
use crate::workspace::Workspace;

/// Lists the contents of a tree named by a reference expression.
///
/// The expression is either a reference (`"refs/heads/main"`, a hex object
/// id, the working-snapshot sentinel), a bare path into the working
/// snapshot (`"roads/highways"`), or a `"ref:path"` combination. When no
/// expression is supplied, the working snapshot root is listed.
///
/// The expression may name a commit (listed through its root tree), a tree,
/// or a single feature (returned as a singleton; with
/// [`Strategy::TreesOnly`], preceded upward by its ancestor tree chain).
pub struct LsTree<'a> {
    store: &'a dyn ObjectStore,
    refs: &'a dyn RefStore,
    workspace: &'a dyn Workspace,
    reference: Option<String>,
    strategy: Strategy,
    bounds_filter: Option<BoundsFilter>,
}

impl<'a> LsTree<'a> {
    /// Create the operation over its collaborators. The default strategy is
    /// [`Strategy::Children`] and the default reference is the working
    /// snapshot.
    pub fn new(
        store: &'a dyn ObjectStore,
        refs: &'a dyn RefStore,
        workspace: &'a dyn Workspace,
    ) -> Self {
        Self {
            store,
            refs,
            workspace,
            reference: None,
            strategy: Strategy::Children,
            bounds_filter: None,
        }
    }

    /// Set the reference expression to list.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the traversal strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Install a spatial bounds filter; entries (and whole subtrees) whose
    /// extent fails it are skipped without being fetched.
    pub fn bounds_filter(mut self, filter: BoundsFilter) -> Self {
        self.bounds_filter = Some(filter);
        self
    }

    /// Resolve the expression and return the lazy entry sequence.
    ///
    /// Resolution failures surface here, before any entry is produced;
    /// store failures encountered mid-traversal surface through the
    /// returned iterator, terminating it.
    pub fn run(self) -> TraverseResult<Entries<'a>> {
        let expr = self
            .reference
            .clone()
            .unwrap_or_else(|| WORK_HEAD.to_string());

        // Split on the last ':'. The suffix, if any, is a path into the
        // tree named by the prefix.
        let (ref_part, path_part) = match expr.rfind(':') {
            Some(idx) => (&expr[..idx], &expr[idx + 1..]),
            None => ("", ""),
        };

        // Pre-resolve the descriptor id recorded for the path's entry under
        // the ref's root tree. An unresolvable ref part is non-fatal here;
        // the descriptor simply stays null.
        let mut metadata_id = ObjectId::null();
        if !path_part.is_empty() && !ref_part.is_empty() {
            if let Some(root_id) = self.resolve_treeish(ref_part)? {
                let root = self.store.get_tree(&root_id)?;
                if let Some(found) = find_tree_child(self.store, &root, path_part)? {
                    metadata_id = found.metadata_id;
                }
            }
        }

        // A named reference whose current value is null is an unborn head:
        // it lists as empty, not as an error.
        if let Some(reference) = self.lookup_ref(&expr)? {
            if reference.is_unborn() {
                debug!(%expr, "expression names an unborn reference");
                return Ok(Entries::Empty);
            }
        }

        // Resolve the full expression to a concrete object.
        let mut located: Option<ChildEntry> = None;
        let mut resolved = self.resolve_revision(&expr, &mut located)?;

        if resolved.is_none() {
            if expr == WORK_HEAD {
                // Listing an empty working snapshot is not an error.
                return Ok(Entries::Empty);
            }
            if expr.contains(':') {
                // A ref:path expression that resolved to nothing can never
                // be a bare path either.
                return Err(TraverseError::InvalidReference(expr));
            }
            // Fall back to a bare path within the working snapshot.
            path::validate(&expr)?;
            let work_root = self.work_root_tree()?;
            let found = find_tree_child(self.store, &work_root, &expr)?
                .ok_or_else(|| TraverseError::InvalidReference(expr.clone()))?;
            metadata_id = found.metadata_id;
            resolved = Some(self.store.get(&found.id)?);
            located = Some(found);
        }

        let object = resolved.ok_or_else(|| TraverseError::InvalidReference(expr.clone()))?;
        debug!(%expr, kind = %object.kind(), "resolved reference expression");

        match object {
            RevObject::Feature(_) => {
                let entry = located.ok_or_else(|| TraverseError::InvalidReference(expr.clone()))?;
                let mut results = vec![entry];
                if self.strategy == Strategy::TreesOnly {
                    // The caller asked for trees: append every tree that
                    // contains this feature, closest ancestor first.
                    let work_root = self.work_root_tree()?;
                    let mut parent = results[0].parent_path.clone();
                    while !parent.is_empty() {
                        let ancestor = find_tree_child(self.store, &work_root, &parent)?
                            .ok_or_else(|| TraverseError::InvalidReference(expr.clone()))?;
                        parent = ancestor.parent_path.clone();
                        results.push(ancestor);
                    }
                }
                Ok(Entries::Fixed(results.into_iter()))
            }
            object => {
                // A commit is listed through its root tree: an explicit
                // two-step redirect, then tree dispatch.
                let object = match object {
                    RevObject::Commit(commit) => self.store.get(&commit.tree_id)?,
                    other => other,
                };
                let tree = match object {
                    RevObject::Tree(tree) => tree,
                    _ => return Err(TraverseError::InvalidReference(expr)),
                };
                let root_path = if !path_part.is_empty() {
                    path_part.to_string()
                } else if let Some(entry) = &located {
                    entry.path.clone()
                } else {
                    String::new()
                };
                let mut iter =
                    TreeIterator::new(self.store, &root_path, metadata_id, &tree, self.strategy);
                if let Some(filter) = self.bounds_filter {
                    iter = iter.with_bounds_filter(filter);
                }
                Ok(Entries::Streamed(iter))
            }
        }
    }

    /// The working snapshot's root tree; the empty tree when unborn.
    fn work_root_tree(&self) -> TraverseResult<RevTree> {
        let id = self.workspace.root_tree_id()?;
        if id.is_null() {
            Ok(RevTree::empty())
        } else {
            Ok(self.store.get_tree(&id)?)
        }
    }

    /// Look up the expression as a literal reference name. The
    /// working-snapshot sentinel resolves through the workspace accessor,
    /// synthesized as a reference so its unborn state is uniform.
    fn lookup_ref(&self, name: &str) -> TraverseResult<Option<Ref>> {
        if name == WORK_HEAD {
            let root = self.workspace.root_tree_id()?;
            return Ok(Some(Ref::new(WORK_HEAD, root)));
        }
        Ok(self.refs.resolve_name(name)?)
    }

    /// Resolve a treeish name to a root tree id: a name or hex id for a
    /// commit yields the commit's root tree; for a tree, the tree itself.
    fn resolve_treeish(&self, name: &str) -> TraverseResult<Option<ObjectId>> {
        let target = match self.lookup_ref(name)? {
            Some(r) if !r.is_unborn() => Some(r.target),
            Some(_) => None,
            None => ObjectId::from_hex(name).ok(),
        };
        let Some(target) = target else {
            return Ok(None);
        };
        match self.store.read(&target)? {
            Some(RevObject::Commit(commit)) => Ok(Some(commit.tree_id)),
            Some(RevObject::Tree(_)) => Ok(Some(target)),
            _ => Ok(None),
        }
    }

    /// Resolve the full expression to an object: the sentinel, a reference
    /// name, a hex object id, or a `ref:path` combination. When resolution
    /// goes through a path lookup, `located` receives the tree entry the
    /// object was found under.
    fn resolve_revision(
        &self,
        expr: &str,
        located: &mut Option<ChildEntry>,
    ) -> TraverseResult<Option<RevObject>> {
        if expr == WORK_HEAD {
            let root = self.workspace.root_tree_id()?;
            if root.is_null() {
                return Ok(None);
            }
            return Ok(Some(self.store.get(&root)?));
        }
        if let Some(reference) = self.refs.resolve_name(expr)? {
            if reference.is_unborn() {
                return Ok(None);
            }
            return Ok(Some(self.store.get(&reference.target)?));
        }
        if let Ok(id) = ObjectId::from_hex(expr) {
            return Ok(self.store.read(&id)?);
        }
        if let Some(idx) = expr.rfind(':') {
            let (ref_part, path_part) = (&expr[..idx], &expr[idx + 1..]);
            if ref_part.is_empty() || path_part.is_empty() {
                return Ok(None);
            }
            let Some(root_id) = self.resolve_treeish(ref_part)? else {
                return Ok(None);
            };
            let root = self.store.get_tree(&root_id)?;
            let Some(found) = find_tree_child(self.store, &root, path_part)? else {
                return Ok(None);
            };
            let object = self.store.get(&found.id)?;
            *located = Some(found);
            return Ok(Some(object));
        }
        Ok(None)
    }
}

/// The lazy, single-pass entry sequence produced by [`LsTree::run`].
pub enum Entries<'a> {
    /// A legitimate absence of content (unborn reference, empty working
    /// snapshot).
    Empty,
    /// A pre-resolved handful of entries (feature singleton, ancestor
    /// chain).
    Fixed(std::vec::IntoIter<ChildEntry>),
    /// A streaming tree traversal.
    Streamed(TreeIterator<'a>),
}

impl std::fmt::Debug for Entries<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entries::Empty => f.write_str("Entries::Empty"),
            Entries::Fixed(_) => f.write_str("Entries::Fixed(..)"),
            Entries::Streamed(_) => f.write_str("Entries::Streamed(..)"),
        }
    }
}

impl Iterator for Entries<'_> {
    type Item = TraverseResult<ChildEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Empty => None,
            Entries::Fixed(entries) => entries.next().map(Ok),
            Entries::Streamed(iter) => iter.next(),
        }
    }
}
