//! Core reference types.

use serde::{Deserialize, Serialize};

use geode_types::ObjectId;

/// The name of the current-commit reference.
pub const HEAD: &str = "HEAD";

/// The name of the working-snapshot reference: it points at the root tree
/// of the live, possibly uncommitted, working state. Traversal falls back
/// to this reference when no expression is supplied.
pub const WORK_HEAD: &str = "WORK_HEAD";

/// A named reference: a mutable binding from a name to an [`ObjectId`].
///
/// A null target means the reference is *unborn*: the name exists but
/// nothing has been committed behind it (e.g. a branch created in an empty
/// repository).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    /// The reference name (e.g. `"refs/heads/main"`, [`WORK_HEAD`]).
    pub name: String,
    /// The object the reference currently points to; null when unborn.
    pub target: ObjectId,
}

impl Ref {
    /// Create a reference pointing at `target`.
    pub fn new(name: impl Into<String>, target: ObjectId) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    /// Create an unborn reference (null target).
    pub fn unborn(name: impl Into<String>) -> Self {
        Self::new(name, ObjectId::null())
    }

    /// Returns `true` if this reference has a null target.
    pub fn is_unborn(&self) -> bool {
        self.target.is_null()
    }
}
