use thiserror::Error;

use geode_refs::RefError;
use geode_store::StoreError;
use geode_types::TypeError;

/// Errors from reference resolution and traversal.
#[derive(Debug, Error)]
pub enum TraverseError {
    /// The expression does not resolve to any known object or path. Carries
    /// the original expression as supplied by the caller.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A path string failed structural validation.
    #[error("invalid path: {0}")]
    InvalidPath(#[from] TypeError),

    /// The object store failed or a referenced object is missing.
    #[error("object store: {0}")]
    Store(#[from] StoreError),

    /// The reference store failed.
    #[error("reference store: {0}")]
    Refs(#[from] RefError),
}

/// Result alias for traversal operations.
pub type TraverseResult<T> = Result<T, TraverseError>;
