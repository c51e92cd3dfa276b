//! # Cookbook - A Recipe Registry and Resolver
//!
//! Cookbook stores named entries (atomic ingredients and composite recipes)
//! and flattens any recipe into the total quantity of every ingredient it
//! needs plus its overall cook time.
//!
//! ## Core Concepts
//!
//! - **Entry**: a named node, either an `Ingredient` or a `Recipe`
//! - **Ingredient**: a leaf with a fixed cook time
//! - **Recipe**: a list of required items, referenced by name, with quantities
//! - **Summary**: the flattened ingredient totals and cook time of a recipe
//!
//! Recipes may share sub-recipes (diamonds aggregate), but a recipe may not
//! require itself, directly or transitively.
//!
//! ## Usage
//!
//! ```rust
//! use cookbook::{Cookbook, Entry};
//!
//! let cookbook = Cookbook::in_memory();
//! cookbook.insert(Entry::ingredient("Egg", 1))?;
//! cookbook.insert(Entry::ingredient("Flour", 0))?;
//! cookbook.insert(Entry::recipe("Batter", [("Egg", 1), ("Flour", 2)]))?;
//! cookbook.insert(Entry::recipe("Cake", [("Egg", 2), ("Batter", 1)]))?;
//!
//! let summary = cookbook.summarize("Cake")?;
//! assert_eq!(summary.cook_time, 3);
//! assert_eq!(summary.quantity_of("Egg"), Some(3));
//! assert_eq!(summary.quantity_of("Flour"), Some(2));
//! # Ok::<(), cookbook::CookbookError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod cookbook;
pub mod entry;
pub mod error;
pub mod name;
pub mod resolver;
pub mod storage;
pub mod validation;

/// HTTP/JSON transport (requires the `transport-http` feature).
#[cfg(feature = "transport-http")]
pub mod transport;

// Re-export primary types at crate root for convenience
pub use config::ServerConfig;
pub use cookbook::Cookbook;
pub use entry::{Entry, EntryKind, Ingredient, Recipe, RequiredItem};
pub use error::{
    CookbookError, CookbookResult, EntryError, GraphError, NormalizeError, ResolutionError,
};
pub use name::{normalize, normalize_value};
pub use resolver::{resolve, IngredientTotal, Resolver, Summary};
pub use storage::{EntryStore, InMemoryEntryStore, StorageError};
