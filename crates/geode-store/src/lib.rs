//! Content-addressed object storage for Geode.
//!
//! This crate defines the immutable revision object model and the hash-keyed
//! object database it is stored in, analogous to git's `.git/objects/`
//! directory. Every versioned datum is an immutable object identified by the
//! BLAKE3 hash of its canonical encoding (domain-separated by object kind).
//!
//! # Object Types
//!
//! - [`Feature`] -- a single geospatial record with an optional bounding extent
//! - [`RevTree`] -- an ordered, named collection of feature and subtree entries
//! - [`RevCommit`] -- a snapshot: root tree id, parent commit ids, and metadata
//!
//! All three are variants of the closed [`RevObject`] sum; resolution and
//! traversal code dispatches exhaustively on it.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Concurrent reads are always safe.
//! 3. All I/O errors are propagated, never silently ignored.
//! 4. Traversal layers treat the store as read-only; only builders write.

pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{ChildKind, Feature, ObjectKind, RevCommit, RevObject, RevTree, TreeChild};
pub use traits::ObjectStore;
