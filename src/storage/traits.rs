//! Abstract storage trait for cookbook entries.
//!
//! The resolver and the service facade only talk to [`EntryStore`], so an
//! alternative backend can be dropped in without touching either.

use std::sync::Arc;

use thiserror::Error;

use crate::entry::Entry;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Key already exists.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Backend error.
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// Storage trait for cookbook entries.
///
/// # Consistency
/// - The store is insert-only. Entries are never updated or removed.
/// - `insert` must perform its membership test and write as one atomic step,
///   so that of two racing inserts for the same name exactly one succeeds.
/// - Readers must observe an entry either fully formed or not at all.
pub trait EntryStore: Send + Sync {
    /// Insert a new entry keyed by its name. Returns `DuplicateKey` if the
    /// name is taken.
    fn insert(&self, entry: Entry) -> Result<(), StorageError>;

    /// Get an entry by name.
    fn get(&self, name: &str) -> Result<Option<Arc<Entry>>, StorageError>;

    /// Returns true if an entry with this name exists.
    fn contains(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.get(name)?.is_some())
    }

    /// Number of stored entries.
    fn len(&self) -> Result<usize, StorageError>;

    /// Returns true if nothing has been stored yet.
    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the trait is object-safe
    fn _assert_entry_store_object_safe(_: &dyn EntryStore) {}

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::DuplicateKey("Egg".to_string());
        assert!(err.to_string().contains("Duplicate key: Egg"));

        let err = StorageError::BackendError("poisoned lock".to_string());
        assert!(err.to_string().contains("poisoned lock"));
    }
}
