//! Service facade.
//!
//! [`Cookbook`] ties the normalizer, validator, store and resolver together
//! behind the three request/response operations the transports expose. It
//! is synchronous: every operation is bounded and never waits on I/O.

use std::sync::Arc;

use serde_json::Value;

use crate::entry::Entry;
use crate::error::{CookbookResult, EntryError};
use crate::name;
use crate::resolver::{Resolver, Summary};
use crate::storage::{EntryStore, InMemoryEntryStore};
use crate::validation;

/// A recipe registry bound to one store.
///
/// Construct one per process (or per test) and share it via `Arc`.
#[derive(Clone)]
pub struct Cookbook {
    store: Arc<dyn EntryStore>,
}

impl Default for Cookbook {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryEntryStore::new()))
    }
}

impl Cookbook {
    /// Create a cookbook over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Create a cookbook over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Normalize a free-form name. Does not touch the store.
    pub fn parse_name(&self, input: &Value) -> CookbookResult<String> {
        Ok(name::normalize_value(input)?)
    }

    /// Validate a raw entry payload and store it.
    ///
    /// Checks run in this order: header (`type`, `name`), duplicate name,
    /// then the variant body. The store repeats the duplicate check inside
    /// its write lock, so concurrent inserts of one name cannot both win.
    pub fn create_entry(&self, raw: &Value) -> CookbookResult<()> {
        let header = validation::parse_header(raw)?;
        if self.store.contains(header.name)? {
            return Err(EntryError::DuplicateName {
                name: header.name.to_string(),
            }
            .into());
        }
        let entry = validation::parse_body(header, raw)?;
        self.publish(entry)
    }

    /// Store an entry that was constructed in code.
    pub fn insert(&self, entry: Entry) -> CookbookResult<()> {
        validation::validate(&entry)?;
        self.publish(entry)
    }

    fn publish(&self, entry: Entry) -> CookbookResult<()> {
        let kind = entry.kind();
        let name = entry.name().to_string();
        self.store.insert(entry)?;
        tracing::info!(%kind, name = %name, "entry added");
        Ok(())
    }

    /// Look up a stored entry by exact name.
    pub fn entry(&self, name: &str) -> CookbookResult<Option<Arc<Entry>>> {
        Ok(self.store.get(name)?)
    }

    /// Flatten the recipe called `name` into ingredient totals and cook time.
    pub fn summarize(&self, name: &str) -> CookbookResult<Summary> {
        let summary = Resolver::new(self.store.as_ref()).resolve(name)?;
        Ok(summary)
    }

    /// Number of stored entries.
    pub fn len(&self) -> CookbookResult<usize> {
        Ok(self.store.len()?)
    }

    /// Returns true if no entries have been stored.
    pub fn is_empty(&self) -> CookbookResult<bool> {
        Ok(self.store.is_empty()?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::{CookbookError, GraphError, ResolutionError};

    #[test]
    fn create_entry_then_summarize() {
        let cookbook = Cookbook::in_memory();
        cookbook
            .create_entry(&json!({"type": "ingredient", "name": "Bread", "cookTime": 2}))
            .unwrap();
        cookbook
            .create_entry(&json!({
                "type": "recipe",
                "name": "Toast",
                "requiredItems": [{"name": "Bread", "quantity": 2}]
            }))
            .unwrap();

        let summary = cookbook.summarize("Toast").unwrap();
        assert_eq!(summary.cook_time, 4);
        assert_eq!(summary.quantity_of("Bread"), Some(2));
        assert_eq!(cookbook.len().unwrap(), 2);
    }

    #[test]
    fn duplicate_name_wins_over_invalid_body() {
        let cookbook = Cookbook::in_memory();
        cookbook
            .create_entry(&json!({"type": "ingredient", "name": "Egg", "cookTime": 1}))
            .unwrap();

        let err = cookbook
            .create_entry(&json!({"type": "ingredient", "name": "Egg", "cookTime": -5}))
            .unwrap_err();
        assert!(matches!(err, CookbookError::Entry(EntryError::DuplicateName { .. })));

        let stored = cookbook.entry("Egg").unwrap().unwrap();
        assert_eq!(*stored, Entry::ingredient("Egg", 1));
    }

    #[test]
    fn failed_validation_leaves_store_unchanged() {
        let cookbook = Cookbook::in_memory();
        let err = cookbook
            .create_entry(&json!({
                "type": "recipe",
                "name": "Omelette",
                "requiredItems": [{"name": "Egg", "quantity": 2}, {"name": "Egg", "quantity": 1}]
            }))
            .unwrap_err();
        assert!(matches!(err, CookbookError::Entry(EntryError::InvalidRecipe { .. })));
        assert!(cookbook.is_empty().unwrap());
        assert!(cookbook.entry("Omelette").unwrap().is_none());
    }

    #[test]
    fn typed_insert_is_validated() {
        let cookbook = Cookbook::in_memory();
        assert!(cookbook.insert(Entry::ingredient("Egg", -1)).is_err());
        cookbook.insert(Entry::ingredient("Egg", 1)).unwrap();
        let err = cookbook.insert(Entry::recipe("Egg", [("Salt", 1)])).unwrap_err();
        assert!(matches!(err, CookbookError::Entry(EntryError::DuplicateName { .. })));
    }

    #[test]
    fn forward_references_are_legal_until_summarized() {
        let cookbook = Cookbook::in_memory();
        cookbook.insert(Entry::recipe("Pie", [("Crust", 1)])).unwrap();

        let err = cookbook.summarize("Pie").unwrap_err();
        assert!(matches!(
            err,
            CookbookError::Resolution(ResolutionError::InvalidGraph(GraphError::DanglingReference { .. }))
        ));

        cookbook.insert(Entry::ingredient("Crust", 10)).unwrap();
        assert_eq!(cookbook.summarize("Pie").unwrap().cook_time, 10);
    }

    #[test]
    fn parse_name_does_not_touch_store() {
        let cookbook = Cookbook::in_memory();
        assert_eq!(cookbook.parse_name(&json!("meat_pie")).unwrap(), "Meat Pie");
        assert!(matches!(
            cookbook.parse_name(&json!(7)),
            Err(CookbookError::Normalize(_))
        ));
        assert!(cookbook.is_empty().unwrap());
    }
}
