//! Error types for the cookbook.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the exact failure kind. Every failure is scoped to a single request:
//! nothing here is fatal to the process.

use thiserror::Error;

pub use crate::storage::StorageError;

/// Failure to canonicalize a free-form name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("Invalid name input: {reason}")]
    InvalidInput {
        reason: &'static str,
    },
}

/// Errors raised while validating and inserting an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Malformed entry: {reason}")]
    MalformedEntry {
        reason: String,
    },

    #[error("An entry named '{name}' already exists")]
    DuplicateName {
        name: String,
    },

    #[error("Invalid ingredient '{name}': {reason}")]
    InvalidIngredient {
        name: String,
        reason: String,
    },

    #[error("Invalid recipe '{name}': {reason}")]
    InvalidRecipe {
        name: String,
        reason: String,
    },
}

/// Structural defects found while expanding a recipe graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("'{name}' is required but was never added")]
    DanglingReference {
        name: String,
    },

    #[error("'{name}' requires itself")]
    Cycle {
        name: String,
    },
}

/// Errors raised while resolving a recipe summary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Recipe not found: {name}")]
    NotFound {
        name: String,
    },

    #[error("'{name}' is an ingredient, not a recipe")]
    NotARecipe {
        name: String,
    },

    #[error("Invalid recipe graph: {0}")]
    InvalidGraph(#[from] GraphError),

    #[error("Quantity overflow while expanding '{name}'")]
    Overflow {
        name: String,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
    },
}

impl From<StorageError> for ResolutionError {
    fn from(err: StorageError) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

/// Top-level error type for the cookbook.
#[derive(Debug, Error)]
pub enum CookbookError {
    #[error("Normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Entry error: {0}")]
    Entry(#[from] EntryError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for CookbookError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateKey(name) => Self::Entry(EntryError::DuplicateName { name }),
            other => Self::Storage(other),
        }
    }
}

impl CookbookError {
    /// Returns true if the request was rejected by local validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Normalize(_) | Self::Entry(_))
    }

    /// Returns true if this is a resolution failure.
    #[must_use]
    pub const fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }

    /// Returns true if the storage backend failed.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Resolution(ResolutionError::Storage { .. })
        )
    }

    /// Returns true if this error is retryable.
    ///
    /// Validation and resolution outcomes depend only on the request and the
    /// (insert-only) registry, so retrying them is pointless.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Storage(e) => !matches!(e, StorageError::DuplicateKey(_)),
            Self::Resolution(ResolutionError::Storage { .. }) => true,
            _ => false,
        }
    }
}

/// Result type alias for cookbook operations.
pub type CookbookResult<T> = Result<T, CookbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_error_duplicate_message() {
        let err = EntryError::DuplicateName {
            name: "Egg".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Egg"));
        assert!(msg.contains("already exists"));
    }

    #[test]
    fn test_graph_error_surfaces_as_invalid_graph() {
        let err: ResolutionError = GraphError::Cycle {
            name: "X".to_string(),
        }
        .into();
        assert!(matches!(err, ResolutionError::InvalidGraph(GraphError::Cycle { .. })));
        assert!(err.to_string().contains("Invalid recipe graph"));
    }

    #[test]
    fn test_duplicate_key_maps_to_duplicate_name() {
        let err: CookbookError = StorageError::DuplicateKey("Cake".to_string()).into();
        assert!(matches!(
            err,
            CookbookError::Entry(EntryError::DuplicateName { ref name }) if name == "Cake"
        ));
        assert!(err.is_validation());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_backend_error_is_retryable() {
        let err: CookbookError = StorageError::BackendError("poisoned lock".to_string()).into();
        assert!(err.is_storage());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_backend_error_during_resolution_is_retryable() {
        let err: CookbookError =
            ResolutionError::from(StorageError::BackendError("poisoned lock".to_string())).into();
        assert!(err.is_storage());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_resolution_error_not_retryable() {
        let err: CookbookError = ResolutionError::NotFound {
            name: "Cake".to_string(),
        }
        .into();
        assert!(err.is_resolution());
        assert!(!err.is_validation());
        assert!(!err.is_retryable());
    }
}
