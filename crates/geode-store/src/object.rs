use serde::{Deserialize, Serialize};

use geode_types::{Extent, ObjectId};

use crate::error::{StoreError, StoreResult};

/// The kind of a stored revision object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A snapshot of the whole dataset: root tree plus ancestry metadata.
    Commit,
    /// An ordered, named collection of feature and subtree entries.
    Tree,
    /// A single geospatial record.
    Feature,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commit => write!(f, "commit"),
            Self::Tree => write!(f, "tree"),
            Self::Feature => write!(f, "feature"),
        }
    }
}

impl ObjectKind {
    /// Domain-separation tag folded into the content hash, so that a tree
    /// and a feature with identical encodings can never collide.
    fn hash_domain(&self) -> &'static [u8] {
        match self {
            Self::Commit => b"geode.commit\0",
            Self::Tree => b"geode.tree\0",
            Self::Feature => b"geode.feature\0",
        }
    }
}

/// The type tag carried by a tree child: a nested tree or a leaf feature.
///
/// This is deliberately narrower than [`ObjectKind`]; a tree can never
/// contain a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChildKind {
    Tree,
    Feature,
}

impl ChildKind {
    /// The object kind a child of this kind resolves to in the store.
    pub fn object_kind(&self) -> ObjectKind {
        match self {
            Self::Tree => ObjectKind::Tree,
            Self::Feature => ObjectKind::Feature,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }

    pub fn is_feature(&self) -> bool {
        matches!(self, Self::Feature)
    }
}

/// A single named entry in a [`RevTree`].
///
/// Each child records the id of the object it points to, a type tag, the id
/// of the feature-type descriptor shared by sibling features (null when the
/// child introduces no descriptor of its own), and an optional bounding
/// extent covering everything beneath it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeChild {
    /// Path segment naming this child within its tree.
    pub name: String,
    /// Id of the referenced tree or feature object.
    pub id: ObjectId,
    /// Whether the child is a subtree or a leaf feature.
    pub kind: ChildKind,
    /// Feature-type descriptor id, or null to inherit the parent tree's.
    pub metadata_id: ObjectId,
    /// Bounding extent of the referenced object, when known.
    pub extent: Option<Extent>,
}

impl TreeChild {
    /// Create a subtree child.
    pub fn tree(
        name: impl Into<String>,
        id: ObjectId,
        metadata_id: ObjectId,
        extent: Option<Extent>,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            kind: ChildKind::Tree,
            metadata_id,
            extent,
        }
    }

    /// Create a leaf feature child.
    pub fn feature(
        name: impl Into<String>,
        id: ObjectId,
        metadata_id: ObjectId,
        extent: Option<Extent>,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            kind: ChildKind::Feature,
            metadata_id,
            extent,
        }
    }
}

/// An ordered collection of named children; the interior node of the
/// revision tree.
///
/// Children keep their declared order (traversal order is defined by it)
/// and are unique by name. Trees may nest to arbitrary depth; child trees
/// are separate objects referenced by id, never inlined.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevTree {
    children: Vec<TreeChild>,
}

impl RevTree {
    /// Create a tree from its children, preserving their order.
    ///
    /// Fails with [`StoreError::DuplicateChild`] if two children share a
    /// name.
    pub fn new(children: Vec<TreeChild>) -> StoreResult<Self> {
        for (i, child) in children.iter().enumerate() {
            if children[..i].iter().any(|c| c.name == child.name) {
                return Err(StoreError::DuplicateChild(child.name.clone()));
            }
        }
        Ok(Self { children })
    }

    /// The empty tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the tree has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The children in declared order.
    pub fn children(&self) -> &[TreeChild] {
        &self.children
    }

    /// Look up a direct child by name.
    pub fn get(&self, name: &str) -> Option<&TreeChild> {
        self.children.iter().find(|c| c.name == name)
    }

    /// The union of all child extents, or `None` if no child carries one.
    pub fn extent(&self) -> Option<Extent> {
        self.children
            .iter()
            .filter_map(|c| c.extent)
            .reduce(|acc, e| acc.expand_to_include(&e))
    }
}

/// A commit: an immutable snapshot of the dataset plus its ancestry links.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevCommit {
    /// Id of the root [`RevTree`] of this snapshot.
    pub tree_id: ObjectId,
    /// Parent commit ids; empty for an initial commit.
    pub parents: Vec<ObjectId>,
    /// Author identity string.
    pub author: String,
    /// Commit message.
    pub message: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl RevCommit {
    /// Returns `true` if this commit has no parents.
    pub fn is_initial(&self) -> bool {
        self.parents.is_empty()
    }
}

/// A leaf feature: one geospatial record's encoded attributes and geometry.
///
/// The store does not interpret the payload; decoding it is the concern of
/// the feature-serialization layer above.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Encoded attribute and geometry data.
    pub payload: Vec<u8>,
    /// Bounding extent of the feature's geometry, when known.
    pub extent: Option<Extent>,
}

impl Feature {
    pub fn new(payload: Vec<u8>, extent: Option<Extent>) -> Self {
        Self { payload, extent }
    }
}

/// A revision object: the closed sum of everything the object database can
/// hold. Identity is the hash of the canonical encoding; objects are never
/// mutated, only superseded by new objects with new ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevObject {
    Commit(RevCommit),
    Tree(RevTree),
    Feature(Feature),
}

impl RevObject {
    /// The kind tag of this object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Commit(_) => ObjectKind::Commit,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Feature(_) => ObjectKind::Feature,
        }
    }

    /// Canonical encoding of the object's content (excluding the kind tag).
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        let body = match self {
            Self::Commit(c) => bincode::serialize(c),
            Self::Tree(t) => bincode::serialize(t),
            Self::Feature(f) => bincode::serialize(f),
        };
        body.map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// The content-addressed id: BLAKE3 over the kind's domain tag followed
    /// by the canonical encoding.
    pub fn object_id(&self) -> StoreResult<ObjectId> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.kind().hash_domain());
        hasher.update(&self.encode()?);
        Ok(ObjectId::from_hash(*hasher.finalize().as_bytes()))
    }

    /// Borrow the tree variant, or fail with [`StoreError::WrongKind`].
    pub fn as_tree(&self) -> StoreResult<&RevTree> {
        match self {
            Self::Tree(t) => Ok(t),
            other => Err(self.wrong_kind(ObjectKind::Tree, other.kind())),
        }
    }

    /// Borrow the commit variant, or fail with [`StoreError::WrongKind`].
    pub fn as_commit(&self) -> StoreResult<&RevCommit> {
        match self {
            Self::Commit(c) => Ok(c),
            other => Err(self.wrong_kind(ObjectKind::Commit, other.kind())),
        }
    }

    fn wrong_kind(&self, expected: ObjectKind, actual: ObjectKind) -> StoreError {
        StoreError::WrongKind {
            id: self.object_id().unwrap_or_else(|_| ObjectId::null()),
            expected,
            actual,
        }
    }
}
