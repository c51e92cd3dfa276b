//! Entry storage.
//!
//! `traits` defines the backend contract; `memory` is the in-process backend.

mod memory;
mod traits;

pub use memory::InMemoryEntryStore;
pub use traits::{EntryStore, StorageError};
