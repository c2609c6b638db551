//! Record lookup for related models
//!
//! Populating values through a foreign key and building relation dropdowns
//! both need to read rows of *other* models. [`RecordStore`] is that seam:
//! hosts implement it over their ORM; [`MemoryStore`] covers fixtures and
//! small static lookups.

use indexmap::IndexMap;

use crate::error::FormResult;
use crate::model::Record;

/// Default primary key attribute
pub const DEFAULT_KEY: &str = "id";

/// Finds records of a model by key and lists all records of a model
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore {
    /// Find the record of `model` whose primary key equals `key`
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Store`](crate::error::FormError::Store) if the
    /// lookup itself fails. A missing record is `Ok(None)`.
    fn find(&self, model: &str, key: &str) -> FormResult<Option<Record>>;

    /// All records of `model`, in storage order
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Store`](crate::error::FormError::Store) if the
    /// listing fails.
    fn all(&self, model: &str) -> FormResult<Vec<Record>>;
}

#[derive(Debug, Clone)]
struct Collection {
    key: String,
    records: Vec<Record>,
}

/// In-memory record store keyed by qualified model name
///
/// # Examples
///
/// ```rust
/// use acton_schema_forms::model::Record;
/// use acton_schema_forms::store::{MemoryStore, RecordStore};
///
/// let store = MemoryStore::new().with_records(
///     "App\\Role",
///     vec![
///         Record::new().with("id", 1).with("name", "Admin"),
///         Record::new().with("id", 2).with("name", "Editor"),
///     ],
/// );
///
/// let role = store.find("App\\Role", "2").unwrap().unwrap();
/// assert_eq!(role.text("name").as_deref(), Some("Editor"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    models: IndexMap<String, Collection>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register records of a model keyed by `id`
    #[must_use]
    pub fn with_records(self, model: impl Into<String>, records: Vec<Record>) -> Self {
        self.with_keyed_records(model, DEFAULT_KEY, records)
    }

    /// Register records of a model keyed by a custom attribute
    #[must_use]
    pub fn with_keyed_records(
        mut self,
        model: impl Into<String>,
        key: impl Into<String>,
        records: Vec<Record>,
    ) -> Self {
        self.models.insert(
            model.into(),
            Collection {
                key: key.into(),
                records,
            },
        );
        self
    }
}

impl RecordStore for MemoryStore {
    fn find(&self, model: &str, key: &str) -> FormResult<Option<Record>> {
        Ok(self.models.get(model).and_then(|collection| {
            collection
                .records
                .iter()
                .find(|r| r.text(&collection.key).as_deref() == Some(key))
                .cloned()
        }))
    }

    fn all(&self, model: &str) -> FormResult<Vec<Record>> {
        Ok(self
            .models
            .get(model)
            .map(|collection| collection.records.clone())
            .unwrap_or_default())
    }
}
