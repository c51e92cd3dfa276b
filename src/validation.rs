//! Entry validation.
//!
//! Payloads arrive as untyped JSON, so every field is checked by hand
//! before an [`Entry`] is built. Typed entries built in code go through the
//! same checks via [`validate`].

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::entry::{Entry, EntryKind, Ingredient, Recipe, RequiredItem};
use crate::error::EntryError;

/// Upper bound on entry and item names, in bytes.
pub const MAX_NAME_LEN: usize = 1024;

/// Upper bound on the number of required items in a single recipe.
pub const MAX_REQUIRED_ITEMS: usize = 4096;

fn malformed(reason: impl Into<String>) -> EntryError {
    EntryError::MalformedEntry {
        reason: reason.into(),
    }
}

fn invalid_ingredient(name: &str, reason: impl Into<String>) -> EntryError {
    EntryError::InvalidIngredient {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn invalid_recipe(name: &str, reason: impl Into<String>) -> EntryError {
    EntryError::InvalidRecipe {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// The `type` and `name` of a raw entry payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader<'a> {
    /// Declared variant.
    pub kind: EntryKind,
    /// Declared entry name.
    pub name: &'a str,
}

/// Checks that `raw` is an object with a known `type` and a string `name`.
pub fn parse_header(raw: &Value) -> Result<EntryHeader<'_>, EntryError> {
    let Value::Object(fields) = raw else {
        return Err(malformed("entry must be a JSON object"));
    };

    let kind = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(EntryKind::from_tag)
        .ok_or_else(|| malformed("type must be \"ingredient\" or \"recipe\""))?;

    let Some(name) = fields.get("name").and_then(Value::as_str) else {
        return Err(malformed("name must be a string"));
    };
    if name.len() > MAX_NAME_LEN {
        return Err(malformed(format!("name exceeds {MAX_NAME_LEN} bytes")));
    }

    Ok(EntryHeader { kind, name })
}

/// Validates the variant-specific body of a payload whose header already
/// passed [`parse_header`].
pub fn parse_body(header: EntryHeader<'_>, raw: &Value) -> Result<Entry, EntryError> {
    let Value::Object(fields) = raw else {
        return Err(malformed("entry must be a JSON object"));
    };

    match header.kind {
        EntryKind::Ingredient => parse_ingredient(header.name, fields),
        EntryKind::Recipe => parse_recipe(header.name, fields),
    }
}

/// Validates a raw payload end to end.
///
/// Does not consult the store: duplicate entry names and unknown item
/// references are not detected here.
pub fn parse_entry(raw: &Value) -> Result<Entry, EntryError> {
    let header = parse_header(raw)?;
    parse_body(header, raw)
}

fn parse_ingredient(name: &str, fields: &Map<String, Value>) -> Result<Entry, EntryError> {
    let cook_time = fields
        .get("cookTime")
        .and_then(Value::as_i64)
        .ok_or_else(|| invalid_ingredient(name, "cookTime must be a 64-bit signed integer"))?;
    if cook_time < 0 {
        return Err(invalid_ingredient(name, "cookTime must not be negative"));
    }

    Ok(Entry::Ingredient(Ingredient {
        name: name.to_string(),
        cook_time,
    }))
}

fn parse_recipe(name: &str, fields: &Map<String, Value>) -> Result<Entry, EntryError> {
    let Some(raw_items) = fields.get("requiredItems").and_then(Value::as_array) else {
        return Err(invalid_recipe(name, "requiredItems must be an array"));
    };
    if raw_items.len() > MAX_REQUIRED_ITEMS {
        return Err(invalid_recipe(
            name,
            format!("more than {MAX_REQUIRED_ITEMS} required items"),
        ));
    }

    let mut seen = HashSet::with_capacity(raw_items.len());
    let mut required_items = Vec::with_capacity(raw_items.len());

    for (idx, raw_item) in raw_items.iter().enumerate() {
        let Value::Object(item) = raw_item else {
            return Err(invalid_recipe(name, format!("requiredItems[{idx}] must be an object")));
        };
        let Some(item_name) = item.get("name").and_then(Value::as_str) else {
            return Err(invalid_recipe(name, format!("requiredItems[{idx}].name must be a string")));
        };
        let Some(quantity) = item.get("quantity").and_then(Value::as_i64) else {
            return Err(invalid_recipe(
                name,
                format!("requiredItems[{idx}].quantity must be a 64-bit signed integer"),
            ));
        };
        if item_name.len() > MAX_NAME_LEN {
            return Err(invalid_recipe(name, format!("requiredItems[{idx}].name is too long")));
        }
        if !seen.insert(item_name) {
            return Err(invalid_recipe(name, format!("'{item_name}' is listed more than once")));
        }
        required_items.push(RequiredItem::new(item_name, quantity));
    }

    Ok(Entry::Recipe(Recipe {
        name: name.to_string(),
        required_items,
    }))
}

/// Validates an entry that was constructed in code rather than parsed.
pub fn validate(entry: &Entry) -> Result<(), EntryError> {
    if entry.name().len() > MAX_NAME_LEN {
        return Err(malformed(format!("name exceeds {MAX_NAME_LEN} bytes")));
    }

    match entry {
        Entry::Ingredient(i) if i.cook_time < 0 => {
            Err(invalid_ingredient(&i.name, "cookTime must not be negative"))
        }
        Entry::Ingredient(_) => Ok(()),
        Entry::Recipe(r) => validate_recipe(r),
    }
}

fn validate_recipe(recipe: &Recipe) -> Result<(), EntryError> {
    if recipe.required_items.len() > MAX_REQUIRED_ITEMS {
        return Err(invalid_recipe(
            &recipe.name,
            format!("more than {MAX_REQUIRED_ITEMS} required items"),
        ));
    }
    if let Some(idx) = recipe
        .required_items
        .iter()
        .position(|i| i.name.len() > MAX_NAME_LEN)
    {
        return Err(invalid_recipe(&recipe.name, format!("requiredItems[{idx}].name is too long")));
    }
    if let Some(dup) = recipe.duplicate_item() {
        return Err(invalid_recipe(&recipe.name, format!("'{dup}' is listed more than once")));
    }
    Ok(())
}
