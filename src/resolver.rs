//! Recipe resolution.
//!
//! Expands a recipe into the flat list of ingredients it ultimately needs,
//! multiplying quantities along every path and summing cook time.
//!
//! # Algorithm
//! Post-order depth-first walk over an explicit stack. Each recipe is
//! flattened once per resolution, for one unit of itself, and every later
//! reference reuses that result scaled by the requested quantity. Shared
//! sub-recipes (diamonds) therefore aggregate in time linear in the size of
//! the graph. A recipe that is reached again while it is still being
//! flattened lies on its own path, which is a cycle.
//!
//! Any failure aborts the whole resolution; no partial summary is returned.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, Ingredient};
use crate::error::{GraphError, ResolutionError};
use crate::storage::EntryStore;

/// Aggregated quantity of one ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientTotal {
    /// Ingredient name.
    pub name: String,
    /// Total units required by one unit of the resolved recipe.
    pub quantity: i64,
}

/// Flattened view of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Name of the resolved recipe.
    pub name: String,
    /// Sum of `cookTime * multiplier` over every ingredient reached.
    pub cook_time: i64,
    /// Ingredient totals, in the order each ingredient was first reached.
    pub ingredients: Vec<IngredientTotal>,
}

impl Summary {
    /// Looks up the aggregated quantity of one ingredient.
    #[must_use]
    pub fn quantity_of(&self, ingredient: &str) -> Option<i64> {
        self.ingredients
            .iter()
            .find(|t| t.name == ingredient)
            .map(|t| t.quantity)
    }
}

/// Totals for one unit of a recipe. `None` from the adders means overflow.
#[derive(Debug, Default)]
struct Flattened {
    totals: IndexMap<String, i64>,
    cook_time: i64,
}

impl Flattened {
    fn add_ingredient(&mut self, ingredient: &Ingredient, quantity: i64) -> Option<()> {
        let bucket = self.totals.entry(ingredient.name.clone()).or_insert(0);
        *bucket = bucket.checked_add(quantity)?;
        self.cook_time = ingredient
            .cook_time
            .checked_mul(quantity)
            .and_then(|t| self.cook_time.checked_add(t))?;
        Some(())
    }

    fn add_scaled(&mut self, other: &Self, factor: i64) -> Option<()> {
        for (name, quantity) in &other.totals {
            let scaled = quantity.checked_mul(factor)?;
            let bucket = self.totals.entry(name.clone()).or_insert(0);
            *bucket = bucket.checked_add(scaled)?;
        }
        self.cook_time = other
            .cook_time
            .checked_mul(factor)
            .and_then(|t| self.cook_time.checked_add(t))?;
        Some(())
    }
}

/// A recipe whose items are being walked.
struct Frame {
    entry: Arc<Entry>,
    quantity: i64,
    next: usize,
    flat: Flattened,
}

impl Frame {
    fn new(entry: Arc<Entry>, quantity: i64) -> Self {
        Self {
            entry,
            quantity,
            next: 0,
            flat: Flattened::default(),
        }
    }

    fn next_item(&mut self) -> Option<(String, i64)> {
        let item = self.entry.as_recipe()?.required_items.get(self.next)?;
        let next = (item.name.clone(), item.quantity);
        self.next += 1;
        Some(next)
    }
}

fn overflow(name: &str) -> ResolutionError {
    ResolutionError::Overflow {
        name: name.to_string(),
    }
}

/// Resolves recipes against an [`EntryStore`].
pub struct Resolver<'a> {
    store: &'a dyn EntryStore,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver reading from `store`.
    #[must_use]
    pub fn new(store: &'a dyn EntryStore) -> Self {
        Self { store }
    }

    /// Flattens the recipe called `root`.
    ///
    /// # Errors
    /// - `NotFound` / `NotARecipe` if `root` is absent or is an ingredient
    /// - `InvalidGraph` if some path reaches a missing entry or a cycle
    /// - `Overflow` if a quantity, a total, or the cook time leaves `i64`
    pub fn resolve(&self, root: &str) -> Result<Summary, ResolutionError> {
        let root_entry = match self.store.get(root)? {
            None => {
                return Err(ResolutionError::NotFound {
                    name: root.to_string(),
                })
            }
            Some(entry) if entry.as_recipe().is_none() => {
                return Err(ResolutionError::NotARecipe {
                    name: root.to_string(),
                })
            }
            Some(entry) => entry,
        };

        tracing::debug!(recipe = root, "resolving recipe");

        let mut done: HashMap<String, Flattened> = HashMap::new();
        let mut on_path: HashSet<String> = HashSet::from([root.to_string()]);
        let mut stack = vec![Frame::new(root_entry, 1)];
        let mut resolved = Flattened::default();

        while let Some(frame) = stack.last_mut() {
            let Some((name, quantity)) = frame.next_item() else {
                let Some(finished) = stack.pop() else { break };
                let name = finished.entry.name().to_string();
                on_path.remove(&name);
                match stack.last_mut() {
                    Some(parent) => {
                        parent
                            .flat
                            .add_scaled(&finished.flat, finished.quantity)
                            .ok_or_else(|| overflow(&name))?;
                        done.insert(name, finished.flat);
                    }
                    None => resolved = finished.flat,
                }
                continue;
            };

            if let Some(cached) = done.get(&name) {
                frame
                    .flat
                    .add_scaled(cached, quantity)
                    .ok_or_else(|| overflow(&name))?;
                continue;
            }
            if on_path.contains(&name) {
                return Err(GraphError::Cycle { name }.into());
            }
            let Some(entry) = self.store.get(&name)? else {
                return Err(GraphError::DanglingReference { name }.into());
            };

            if let Entry::Ingredient(ingredient) = entry.as_ref() {
                frame
                    .flat
                    .add_ingredient(ingredient, quantity)
                    .ok_or_else(|| overflow(&name))?;
                continue;
            }

            on_path.insert(name);
            stack.push(Frame::new(entry, quantity));
        }

        tracing::debug!(
            recipe = root,
            ingredients = resolved.totals.len(),
            cook_time = resolved.cook_time,
            sub_recipes = done.len(),
            "resolved recipe"
        );

        Ok(Summary {
            name: root.to_string(),
            cook_time: resolved.cook_time,
            ingredients: resolved
                .totals
                .into_iter()
                .map(|(name, quantity)| IngredientTotal { name, quantity })
                .collect(),
        })
    }
}

/// Flattens `root` from `store`.
pub fn resolve(store: &dyn EntryStore, root: &str) -> Result<Summary, ResolutionError> {
    Resolver::new(store).resolve(root)
}
