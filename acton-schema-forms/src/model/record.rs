//! Attribute records and a schema-less model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{FieldOverrides, Model, ModelMeta};

/// A row of attribute values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    attributes: Map<String, Value>,
}

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an attribute in place
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Raw attribute value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Attribute value rendered as form text
    ///
    /// Strings are returned as-is, scalars via their display form, nested
    /// values as JSON. Null and absent attributes yield `None`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        match self.attributes.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }
}

/// A model defined entirely at runtime
///
/// Useful for hosts whose ORM rows are untyped, and for records returned by a
/// [`RecordStore`](crate::store::RecordStore).
#[derive(Debug, Clone, Default)]
pub struct DynamicModel {
    meta: ModelMeta,
    record: Record,
    overrides: Option<FieldOverrides>,
}

impl DynamicModel {
    /// Create a model instance from metadata and a record
    #[must_use]
    pub const fn new(meta: ModelMeta, record: Record) -> Self {
        Self {
            meta,
            record,
            overrides: None,
        }
    }

    /// Attach a per-field override table
    #[must_use]
    pub fn with_overrides(mut self, overrides: FieldOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// The underlying record
    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.record
    }
}

impl Model for DynamicModel {
    fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.record.text(name)
    }

    fn custom_fields(&self) -> Option<&FieldOverrides> {
        self.overrides.as_ref()
    }
}
