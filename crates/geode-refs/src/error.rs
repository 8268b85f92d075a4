use thiserror::Error;

/// Errors from reference store operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The reference name is not well formed.
    #[error("invalid reference name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The backing store failed.
    #[error("reference storage error: {0}")]
    Storage(String),
}

/// Result alias for reference operations.
pub type Result<T> = std::result::Result<T, RefError>;
