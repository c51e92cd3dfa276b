//! Cookbook entries.
//!
//! Every entry is either an atomic [`Ingredient`] or a composite [`Recipe`].
//! Both share one namespace, and a recipe refers to its sub-items by name
//! only. Those names are resolved lazily when a summary is requested.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One line of a recipe: a reference to another entry plus a multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequiredItem {
    /// Name of the referenced entry.
    pub name: String,
    /// How many of the referenced entry one unit of the recipe needs.
    pub quantity: i64,
}

impl RequiredItem {
    /// Creates a required item.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A leaf entry with a fixed cook time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Unique entry name.
    pub name: String,
    /// Cook time for a single unit. Never negative.
    pub cook_time: i64,
}

/// A composite entry listing required sub-items in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique entry name.
    pub name: String,
    /// Sub-items, unique by name within this recipe.
    pub required_items: Vec<RequiredItem>,
}

impl Recipe {
    /// Returns the first item name that appears more than once, if any.
    #[must_use]
    pub fn duplicate_item(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::with_capacity(self.required_items.len());
        self.required_items
            .iter()
            .find(|item| !seen.insert(item.name.as_str()))
            .map(|item| item.name.as_str())
    }
}

/// Discriminant of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Leaf entry.
    Ingredient,
    /// Composite entry.
    Recipe,
}

impl EntryKind {
    /// Parses the wire tag used in entry payloads.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ingredient" => Some(Self::Ingredient),
            "recipe" => Some(Self::Recipe),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingredient => write!(f, "ingredient"),
            Self::Recipe => write!(f, "recipe"),
        }
    }
}

/// A named node in the cookbook.
///
/// Serializes with a `type` tag, matching the payload accepted by the
/// create-entry operation:
///
/// ```
/// use cookbook::{Entry, Ingredient};
///
/// let egg = Entry::Ingredient(Ingredient { name: "Egg".into(), cook_time: 1 });
/// let json = serde_json::to_value(&egg).unwrap();
/// assert_eq!(json["type"], "ingredient");
/// assert_eq!(json["cookTime"], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    /// Leaf entry.
    Ingredient(Ingredient),
    /// Composite entry.
    Recipe(Recipe),
}

impl Entry {
    /// Convenience constructor for an ingredient.
    #[must_use]
    pub fn ingredient(name: impl Into<String>, cook_time: i64) -> Self {
        Self::Ingredient(Ingredient {
            name: name.into(),
            cook_time,
        })
    }

    /// Convenience constructor for a recipe.
    #[must_use]
    pub fn recipe<N, I>(name: impl Into<String>, items: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, i64)>,
    {
        Self::Recipe(Recipe {
            name: name.into(),
            required_items: items
                .into_iter()
                .map(|(n, q)| RequiredItem::new(n, q))
                .collect(),
        })
    }

    /// The entry's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Ingredient(i) => &i.name,
            Self::Recipe(r) => &r.name,
        }
    }

    /// The entry's variant.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Ingredient(_) => EntryKind::Ingredient,
            Self::Recipe(_) => EntryKind::Recipe,
        }
    }

    /// Returns the recipe if this entry is one.
    #[must_use]
    pub const fn as_recipe(&self) -> Option<&Recipe> {
        match self {
            Self::Recipe(r) => Some(r),
            Self::Ingredient(_) => None,
        }
    }
}
