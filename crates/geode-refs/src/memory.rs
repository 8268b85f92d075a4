//! In-memory reference store for testing and ephemeral use.
//!
//! [`InMemoryRefStore`] stores all refs in a `HashMap` protected by a
//! `RwLock`. It implements the full [`RefStore`] trait and is suitable for
//! unit tests and short-lived processes.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{RefError, Result};
use crate::names::validate_ref_name;
use crate::traits::RefStore;
use crate::types::Ref;

/// An in-memory implementation of [`RefStore`].
///
/// All data lives in a `HashMap` behind a `RwLock`. Data is lost when the
/// store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRefStore {
    refs: RwLock<HashMap<String, Ref>>,
}

impl InMemoryRefStore {
    /// Create a new empty ref store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RefStore for InMemoryRefStore {
    fn resolve_name(&self, name: &str) -> Result<Option<Ref>> {
        let refs = self
            .refs
            .read()
            .map_err(|e| RefError::Storage(format!("lock poisoned: {e}")))?;
        Ok(refs.get(name).cloned())
    }

    fn write_ref(&self, reference: &Ref) -> Result<()> {
        validate_ref_name(&reference.name)?;
        let mut refs = self
            .refs
            .write()
            .map_err(|e| RefError::Storage(format!("lock poisoned: {e}")))?;
        debug!(name = %reference.name, target = %reference.target.short_hex(), "updated ref");
        refs.insert(reference.name.clone(), reference.clone());
        Ok(())
    }

    fn delete_ref(&self, name: &str) -> Result<bool> {
        let mut refs = self
            .refs
            .write()
            .map_err(|e| RefError::Storage(format!("lock poisoned: {e}")))?;
        Ok(refs.remove(name).is_some())
    }

    fn list_refs(&self, prefix: &str) -> Result<Vec<Ref>> {
        let refs = self
            .refs
            .read()
            .map_err(|e| RefError::Storage(format!("lock poisoned: {e}")))?;
        let mut result: Vec<Ref> = refs
            .values()
            .filter(|r| r.name.starts_with(prefix))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}
