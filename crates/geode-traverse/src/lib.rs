//! Reference resolution and lazy tree traversal for Geode.
//!
//! This crate is the read path of the version-control core: it turns a
//! reference expression (`"ref"` or `"ref:path"`, defaulting to the working
//! snapshot) into a lazy sequence of fully qualified [`ChildEntry`] values
//! streamed out of the content-addressed object store.
//!
//! - [`LsTree`] -- the entry point: resolves the expression and dispatches
//!   on the resolved object's kind
//! - [`TreeIterator`] -- the six-strategy, pull-based traversal engine with
//!   spatial-bounds pruning
//! - [`find_tree_child`] -- path lookup within a tree hierarchy
//! - [`Workspace`] -- accessor for the live working snapshot's root tree
//!
//! Traversal is single-threaded and pull-based: each `next()` either yields
//! the following entry or performs the one store fetch needed to continue.
//! Subtrees pruned by a bounds filter are never fetched at all.

pub mod entry;
pub mod error;
pub mod find;
pub mod iterator;
pub mod ls_tree;
pub mod workspace;

pub use entry::ChildEntry;
pub use error::{TraverseError, TraverseResult};
pub use find::find_tree_child;
pub use iterator::{BoundsFilter, Strategy, TreeIterator};
pub use ls_tree::{Entries, LsTree};
pub use workspace::{StaticWorkspace, Workspace};
