//! Field descriptors and the ordered field map
//!
//! A [`FieldDescriptor`] describes how to render one input for one column.
//! A [`FieldMap`] keeps descriptors in column order and is what the builder
//! produces, the transforms rewrite, and the renderers consume.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Disabled state of a field
///
/// The builder produces a plain flag (from the model's override, default
/// `false`). [`FieldMap::disable`] writes the `"disabled"` attribute value
/// instead, which keeps the input visible but non-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disabled {
    /// Flag resolved at build time
    Flag(bool),
    /// Forced by a transform; serialized as `"disabled"`
    Forced,
}

impl Disabled {
    /// Attribute value written by [`FieldMap::disable`]
    pub const ATTRIBUTE: &'static str = "disabled";

    /// Whether the rendered input carries the `disabled` attribute
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Forced => true,
        }
    }
}

impl Default for Disabled {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl Serialize for Disabled {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag(flag) => serializer.serialize_bool(*flag),
            Self::Forced => serializer.serialize_str(Self::ATTRIBUTE),
        }
    }
}

/// How to render one form input for one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Qualified name of the model the column belongs to
    pub model: String,
    /// Element ID (the column name)
    pub id: String,
    /// Input name (the column name)
    pub name: String,
    /// HTML input type; `None` when neither an override nor the type configuration supplies one
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    /// CSS class; `None` when neither an override nor the type configuration supplies one
    pub class: Option<String>,
    /// Validation rule string from the type configuration
    pub validation: Option<String>,
    /// Disabled state
    pub disabled: Disabled,
    /// Declared maximum length of the column
    pub length: Option<u32>,
    /// Current value, empty until populated
    pub value: String,
    /// Selected option key (relation dropdowns only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    /// Option key to label (relation dropdowns only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<IndexMap<String, String>>,
}

impl FieldDescriptor {
    /// Create a descriptor for `name` on `model` with nothing resolved yet
    #[must_use]
    pub fn new(model: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            model: model.into(),
            id: name.clone(),
            name,
            ..Self::default()
        }
    }

    /// Input type as rendered (empty when unresolved)
    #[must_use]
    pub fn input_type(&self) -> &str {
        self.input_type.as_deref().unwrap_or_default()
    }

    /// CSS class as rendered (empty when unresolved)
    #[must_use]
    pub fn class(&self) -> &str {
        self.class.as_deref().unwrap_or_default()
    }

    /// Whether this field renders as a `<select>`
    ///
    /// Requires both the `select` type and at least one option; a `select`
    /// typed field without options falls back to a plain input.
    #[must_use]
    pub fn is_select(&self) -> bool {
        self.input_type() == "select" && self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}

/// Ordered mapping from field name to descriptor
///
/// Iteration follows insertion order, which the builder takes from the
/// schema source's column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: IndexMap<String, FieldDescriptor>,
}

impl FieldMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor under its name, replacing any previous one in place
    pub fn insert(&mut self, field: FieldDescriptor) -> Option<FieldDescriptor> {
        self.fields.insert(field.name.clone(), field)
    }

    /// Remove a descriptor, keeping the order of the others
    pub fn remove(&mut self, name: &str) -> Option<FieldDescriptor> {
        self.fields.shift_remove(name)
    }

    /// Get a descriptor by field name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Get a mutable descriptor by field name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldDescriptor> {
        self.fields.get_mut(name)
    }

    /// Whether a field is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Descriptors in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Mutable descriptors in order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut FieldDescriptor> {
        self.fields.values_mut()
    }
}

impl FromIterator<FieldDescriptor> for FieldMap {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        let mut map = Self::new();
        for field in iter {
            map.insert(field);
        }
        map
    }
}

impl Extend<FieldDescriptor> for FieldMap {
    fn extend<I: IntoIterator<Item = FieldDescriptor>>(&mut self, iter: I) {
        for field in iter {
            self.insert(field);
        }
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, FieldDescriptor);
    type IntoIter = indexmap::map::IntoIter<String, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
