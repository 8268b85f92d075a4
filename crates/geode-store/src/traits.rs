use geode_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{RevCommit, RevObject, RevTree};

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. Content-addressing guarantees this:
///   the same content always produces the same id.
/// - Concurrent reads are always safe (objects are immutable).
/// - All I/O errors are propagated, never silently ignored.
///
/// Traversal and resolution code only ever calls the read side; `write` is
/// for builders and tests populating a store.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its content-addressed id.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<RevObject>>;

    /// Write an object and return its content-addressed id.
    ///
    /// If the object already exists, this is a no-op (idempotent).
    fn write(&self, object: &RevObject) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object that must exist.
    ///
    /// Unlike [`read`](ObjectStore::read), absence is an error here: a
    /// referenced id missing from the store means a dangling reference or
    /// corruption.
    fn get(&self, id: &ObjectId) -> StoreResult<RevObject> {
        self.read(id)?.ok_or(StoreError::NotFound(*id))
    }

    /// Read an object that must exist and be a tree.
    fn get_tree(&self, id: &ObjectId) -> StoreResult<RevTree> {
        match self.get(id)? {
            RevObject::Tree(tree) => Ok(tree),
            other => Err(StoreError::WrongKind {
                id: *id,
                expected: crate::object::ObjectKind::Tree,
                actual: other.kind(),
            }),
        }
    }

    /// Read an object that must exist and be a commit.
    fn get_commit(&self, id: &ObjectId) -> StoreResult<RevCommit> {
        match self.get(id)? {
            RevObject::Commit(commit) => Ok(commit),
            other => Err(StoreError::WrongKind {
                id: *id,
                expected: crate::object::ObjectKind::Commit,
                actual: other.kind(),
            }),
        }
    }
}
