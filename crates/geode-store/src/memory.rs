use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::debug;

use geode_types::ObjectId;

use crate::error::StoreResult;
use crate::object::RevObject;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. All objects are held in memory behind a
/// `RwLock` for safe concurrent access; objects are cloned on read. A read
/// counter tracks how many lookups the store has served, which traversal
/// tests use to verify that pruned subtrees are never fetched.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, RevObject>>,
    reads: AtomicU64,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            reads: AtomicU64::new(0),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Number of `read` calls served since construction.
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Remove all objects from the store.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all object ids in the store.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<RevObject>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn write(&self, object: &RevObject) -> StoreResult<ObjectId> {
        let id = object.object_id()?;
        let mut map = self.objects.write().expect("lock poisoned");
        // Idempotent: content-addressing guarantees the same id always maps
        // to the same content.
        map.entry(id).or_insert_with(|| object.clone());
        debug!(id = %id.short_hex(), kind = %object.kind(), "stored object");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::object::{ChildKind, Feature, ObjectKind, RevCommit, RevTree, TreeChild};

    fn make_feature(payload: &[u8]) -> RevObject {
        RevObject::Feature(Feature::new(payload.to_vec(), None))
    }

    fn make_tree(store: &InMemoryObjectStore) -> StoreResult<ObjectId> {
        let f1 = store.write(&make_feature(b"pt-1"))?;
        let f2 = store.write(&make_feature(b"pt-2"))?;
        let tree = RevTree::new(vec![
            TreeChild::feature("pt-1", f1, ObjectId::null(), None),
            TreeChild::feature("pt-2", f2, ObjectId::null(), None),
        ])?;
        store.write(&RevObject::Tree(tree))
    }

    #[test]
    fn write_and_read_feature() {
        let store = InMemoryObjectStore::new();
        let obj = make_feature(b"a point");
        let id = store.write(&obj).unwrap();
        assert!(!id.is_null());

        let read_back = store.read(&id).unwrap().expect("should exist");
        assert_eq!(read_back, obj);
    }

    #[test]
    fn write_and_read_tree() {
        let store = InMemoryObjectStore::new();
        let id = make_tree(&store).unwrap();

        let tree = store.get_tree(&id).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("pt-1").unwrap().kind, ChildKind::Feature);
    }

    #[test]
    fn write_and_read_commit() {
        let store = InMemoryObjectStore::new();
        let tree_id = make_tree(&store).unwrap();
        let commit = RevCommit {
            tree_id,
            parents: vec![],
            author: "surveyor".into(),
            message: "initial import".into(),
            timestamp: 1_700_000_000,
        };
        let id = store.write(&RevObject::Commit(commit.clone())).unwrap();

        let read_back = store.get_commit(&id).unwrap();
        assert_eq!(read_back, commit);
    }

    #[test]
    fn same_content_produces_same_id() {
        let store = InMemoryObjectStore::new();
        let id1 = store.write(&make_feature(b"identical")).unwrap();
        let id2 = store.write(&make_feature(b"identical")).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn different_content_produces_different_ids() {
        let store = InMemoryObjectStore::new();
        let id1 = store.write(&make_feature(b"aaa")).unwrap();
        let id2 = store.write(&make_feature(b"bbb")).unwrap();
        assert_ne!(id1, id2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn read_missing_object_returns_none() {
        let store = InMemoryObjectStore::new();
        let id = ObjectId::from_bytes(b"missing");
        assert!(store.read(&id).unwrap().is_none());
    }

    #[test]
    fn get_missing_object_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = ObjectId::from_bytes(b"missing");
        let err = store.get(&id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[test]
    fn get_tree_rejects_feature() {
        let store = InMemoryObjectStore::new();
        let id = store.write(&make_feature(b"leaf")).unwrap();
        let err = store.get_tree(&id).unwrap_err();
        assert!(matches!(
            err,
            StoreError::WrongKind {
                expected: ObjectKind::Tree,
                actual: ObjectKind::Feature,
                ..
            }
        ));
    }

    #[test]
    fn exists_reflects_contents() {
        let store = InMemoryObjectStore::new();
        let id = store.write(&make_feature(b"present")).unwrap();
        assert!(store.exists(&id).unwrap());
        assert!(!store.exists(&ObjectId::from_bytes(b"absent")).unwrap());
    }

    #[test]
    fn read_count_tracks_lookups() {
        let store = InMemoryObjectStore::new();
        let id = store.write(&make_feature(b"counted")).unwrap();
        assert_eq!(store.read_count(), 0);
        store.read(&id).unwrap();
        store.read(&id).unwrap();
        assert_eq!(store.read_count(), 2);
        // exists() does not count as a read.
        store.exists(&id).unwrap();
        assert_eq!(store.read_count(), 2);
    }

    #[test]
    fn all_ids_is_sorted() {
        let store = InMemoryObjectStore::new();
        store.write(&make_feature(b"aaa")).unwrap();
        store.write(&make_feature(b"bbb")).unwrap();
        store.write(&make_feature(b"ccc")).unwrap();

        let ids = store.all_ids();
        assert_eq!(ids.len(), 3);
        for w in ids.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryObjectStore::new();
        store.write(&make_feature(b"a")).unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let id = store.write(&make_feature(b"shared")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let obj = store.read(&id).unwrap().unwrap();
                    assert_eq!(obj.object_id().unwrap(), id);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }
}
