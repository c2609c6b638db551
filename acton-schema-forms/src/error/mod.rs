//! Error types and error handling

use thiserror::Error;

use crate::config::ConfigError;

/// Result alias used throughout the crate
pub type FormResult<T> = Result<T, FormError>;

/// Errors raised while building, transforming, or rendering a form
#[derive(Debug, Error)]
pub enum FormError {
    /// A related record referenced through a foreign key does not exist
    #[error("Not found: no {model} record with key '{key}'")]
    NotFound {
        /// Qualified name of the model that was searched
        model: String,
        /// Key value that was looked up
        key: String,
    },

    /// The source record lacks the attribute used as a foreign key
    #[error("Missing attribute '{attribute}' on {model}")]
    MissingAttribute {
        /// Qualified name of the source model
        model: String,
        /// Name of the absent attribute
        attribute: String,
    },

    /// The schema source could not describe the requested table
    #[error("Schema error: {0}")]
    Schema(String),

    /// The record store failed to answer a lookup
    #[error("Store error: {0}")]
    Store(String),

    /// Type configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The compiled form template failed to render
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// A host-supplied form template failed to compile or render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Database error while snapshotting a live schema
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl FormError {
    /// Build a [`FormError::NotFound`] for a model/key pair
    #[must_use]
    pub fn not_found(model: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            model: model.into(),
            key: key.into(),
        }
    }

    /// Whether this error is a lookup miss rather than an infrastructure failure
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = FormError::not_found("App\\Role", "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: no App\\Role record with key '42'");
    }

    #[test]
    fn test_schema_error_is_not_lookup_miss() {
        let err = FormError::Schema("unknown table 'users'".into());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("users"));
    }
}
