//! Transforms over a built field map
//!
//! Each transform consumes a [`FieldMap`] and returns the rewritten map, so
//! they chain:
//!
//! ```rust
//! # use acton_schema_forms::forms::{FieldDescriptor, FieldMap};
//! let fields: FieldMap = ["name", "email", "password"]
//!     .into_iter()
//!     .map(|n| FieldDescriptor::new("App\\User", n))
//!     .collect();
//!
//! let fields = fields.hide(["password"]).disable(["email"]);
//! assert!(!fields.contains("password"));
//! assert!(fields.get("email").unwrap().disabled.is_disabled());
//! ```

use indexmap::IndexMap;

use super::builder::DynamicForms;
use super::field::{Disabled, FieldMap};
use crate::error::{FormError, FormResult};
use crate::model::{Model, Record};
use crate::schema::SchemaSource;
use crate::store::{RecordStore, DEFAULT_KEY};

/// A dropdown fed by the records of a related model
///
/// `column` is the field on the current form (e.g. `role_id`), `entity` the
/// related instance currently linked (its `key` attribute becomes the
/// selected option), and `key`/`label` the attributes projected off every
/// related record to build the options.
pub struct Relation<'a> {
    /// Field on the current form that holds the foreign key
    pub column: String,
    /// Currently linked related instance
    pub entity: &'a dyn Model,
    /// Attribute used as option value
    pub key: String,
    /// Attribute used as option label
    pub label: String,
}

impl<'a> Relation<'a> {
    /// Relate `column` to `entity`, with options keyed by `id` and labelled by `name`
    #[must_use]
    pub fn new(column: impl Into<String>, entity: &'a dyn Model) -> Self {
        Self {
            column: column.into(),
            entity,
            key: DEFAULT_KEY.to_string(),
            label: "name".to_string(),
        }
    }

    /// Choose the attributes projected into option value and label
    #[must_use]
    pub fn pluck(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.key = key.into();
        self.label = label.into();
        self
    }
}

impl std::fmt::Debug for Relation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relation")
            .field("column", &self.column)
            .field("entity", &self.entity.model_name())
            .field("key", &self.key)
            .field("label", &self.label)
            .finish()
    }
}

impl FieldMap {
    /// Fill each field's `value` from a record
    ///
    /// Without `foreign`, values come from `record`'s attribute of the same
    /// name. With `foreign`, the record's `foreign` attribute is used as a key
    /// to find the related record of each field's model, and values come from
    /// that record instead. Unset attributes leave an empty value.
    ///
    /// # Errors
    ///
    /// - [`FormError::MissingAttribute`] if `record` has no value for `foreign`
    /// - [`FormError::NotFound`] if no related record exists for that key
    /// - store failures are propagated
    pub fn populate<M, R>(
        mut self,
        record: &M,
        foreign: Option<&str>,
        store: &R,
    ) -> FormResult<Self>
    where
        M: Model + ?Sized,
        R: RecordStore + ?Sized,
    {
        let Some(foreign) = foreign else {
            for field in self.values_mut() {
                field.value = record.attribute(&field.name).unwrap_or_default();
            }
            return Ok(self);
        };

        let key = record
            .attribute(foreign)
            .ok_or_else(|| FormError::MissingAttribute {
                model: record.model_name().to_string(),
                attribute: foreign.to_string(),
            })?;

        let mut related: IndexMap<String, Record> = IndexMap::new();
        for field in self.values_mut() {
            if !related.contains_key(&field.model) {
                let found = store
                    .find(&field.model, &key)?
                    .ok_or_else(|| FormError::not_found(field.model.clone(), key.clone()))?;
                related.insert(field.model.clone(), found);
            }
            field.value = related[&field.model].text(&field.name).unwrap_or_default();
        }

        tracing::trace!(
            foreign,
            key = %key,
            models = related.len(),
            "Populated values from related records"
        );
        Ok(self)
    }

    /// Turn foreign key fields into dropdowns over a related model
    ///
    /// For each relation, the related entity's own form fields are merged in
    /// (replacing same-named fields in place, appending new ones), then the
    /// `column` field receives `selected` and `options` built from every
    /// record of the related model. A `column` missing from the map after the
    /// merge is skipped.
    ///
    /// # Errors
    ///
    /// Propagates schema source and record store failures.
    pub fn relation<S, R>(
        mut self,
        forms: &DynamicForms<S, R>,
        relations: &[Relation<'_>],
    ) -> FormResult<Self>
    where
        S: SchemaSource,
        R: RecordStore,
    {
        for relation in relations {
            let entity = relation.entity;

            self.extend(forms.form(entity)?.into_iter().map(|(_, field)| field));

            let options: IndexMap<String, String> = forms
                .store()
                .all(entity.model_name())?
                .iter()
                .filter_map(|r| {
                    let key = r.text(&relation.key)?;
                    Some((key, r.text(&relation.label).unwrap_or_default()))
                })
                .collect();

            let Some(field) = self.get_mut(&relation.column) else {
                tracing::warn!(
                    column = %relation.column,
                    model = %entity.model_name(),
                    "Relation column is not part of the form"
                );
                continue;
            };

            tracing::trace!(
                column = %relation.column,
                model = %entity.model_name(),
                options = options.len(),
                "Joined relation options"
            );
            field.selected = entity.attribute(&relation.key);
            field.options = Some(options);
        }

        Ok(self)
    }

    /// Remove fields entirely
    ///
    /// Names not in the map are ignored, so hiding is idempotent.
    #[must_use]
    pub fn hide<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        for name in names {
            self.remove(name.as_ref());
        }
        self
    }

    /// Keep fields visible but mark them `disabled`
    ///
    /// Names not in the map are ignored, so disabling is idempotent.
    #[must_use]
    pub fn disable<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        for name in names {
            if let Some(field) = self.get_mut(name.as_ref()) {
                field.disabled = Disabled::Forced;
            }
        }
        self
    }
}
