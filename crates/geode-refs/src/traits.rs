//! The [`RefStore`] trait defining the reference storage interface.
//!
//! Any backend (in-memory, filesystem, database) implements this trait to
//! provide named reference management. Traversal code only uses the read
//! side ([`resolve_name`]); the write side exists for the command layers
//! above.
//!
//! [`resolve_name`]: RefStore::resolve_name

use crate::error::Result;
use crate::types::Ref;

/// Storage backend for named references.
///
/// Implementations must be thread-safe (`Send + Sync`) and provide atomic
/// read/write/delete operations on named refs.
pub trait RefStore: Send + Sync {
    /// Look up a reference by exact name.
    ///
    /// Returns `Ok(None)` if no reference with that name exists. A returned
    /// reference may still be unborn (null target); that distinction is the
    /// caller's to handle.
    fn resolve_name(&self, name: &str) -> Result<Option<Ref>>;

    /// Write (create or update) a reference.
    fn write_ref(&self, reference: &Ref) -> Result<()>;

    /// Delete a reference by name.
    ///
    /// Returns `Ok(true)` if the reference existed and was deleted,
    /// `Ok(false)` if it did not exist.
    fn delete_ref(&self, name: &str) -> Result<bool>;

    /// List all references whose name starts with `prefix`, sorted by name.
    ///
    /// Pass `""` to list all refs.
    fn list_refs(&self, prefix: &str) -> Result<Vec<Ref>>;
}
