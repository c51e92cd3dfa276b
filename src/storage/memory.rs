//! In-memory storage backend.
//!
//! Thread-safe, process-lifetime storage for cookbook entries. This is the
//! backend the server uses and the one every test builds a fresh copy of.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::entry::Entry;
use crate::storage::traits::{EntryStore, StorageError};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

/// Thread-safe in-memory entry store.
///
/// Entries are published as `Arc<Entry>`, so readers never hold the lock
/// while walking an entry and never see a partially written one.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    by_name: RwLock<HashMap<String, Arc<Entry>>>,
}

impl InMemoryEntryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for InMemoryEntryStore {
    fn insert(&self, entry: Entry) -> Result<(), StorageError> {
        let mut state = self.by_name.write().map_err(|_| lock_err("entry.insert"))?;
        if state.contains_key(entry.name()) {
            return Err(StorageError::DuplicateKey(entry.name().to_string()));
        }
        state.insert(entry.name().to_string(), Arc::new(entry));
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<Arc<Entry>>, StorageError> {
        let state = self.by_name.read().map_err(|_| lock_err("entry.get"))?;
        Ok(state.get(name).cloned())
    }

    fn contains(&self, name: &str) -> Result<bool, StorageError> {
        let state = self.by_name.read().map_err(|_| lock_err("entry.contains"))?;
        Ok(state.contains_key(name))
    }

    fn len(&self) -> Result<usize, StorageError> {
        let state = self.by_name.read().map_err(|_| lock_err("entry.len"))?;
        Ok(state.len())
    }
}
