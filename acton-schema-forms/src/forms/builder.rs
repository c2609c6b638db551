//! Field descriptor builder
//!
//! Turns column metadata into a [`FieldMap`]: columns the model does not let
//! you write back are dropped, the rest get their presentation from the
//! model's override table first and the type configuration second.

use std::sync::Arc;

use super::field::{Disabled, FieldDescriptor, FieldMap};
use super::render::FormView;
use super::template_render::TemplateFormRenderer;
use crate::config::FormsConfig;
use crate::error::FormResult;
use crate::model::{FieldOverride, Model};
use crate::schema::{ColumnMetadata, SchemaSource};
use crate::store::RecordStore;

/// Build descriptors for the columns a model exposes
///
/// Excluded columns are omitted entirely (see
/// [`ModelMeta::exclusion`](crate::model::ModelMeta::exclusion)). Neither the
/// columns nor the model are modified.
#[must_use]
pub fn build_fields<M>(columns: &[ColumnMetadata], model: &M, config: &FormsConfig) -> FieldMap
where
    M: Model + ?Sized,
{
    let meta = model.meta();
    let overrides = model.custom_fields();

    columns
        .iter()
        .filter(|column| match meta.exclusion(&column.name) {
            Some(reason) => {
                tracing::trace!(
                    model = %meta.name,
                    field = %column.name,
                    %reason,
                    "Excluding field"
                );
                false
            }
            None => true,
        })
        .map(|column| {
            let custom = overrides.and_then(|o| o.get(&column.name));
            describe(column, &meta.name, custom, config)
        })
        .collect()
}

fn describe(
    column: &ColumnMetadata,
    model: &str,
    custom: Option<&FieldOverride>,
    config: &FormsConfig,
) -> FieldDescriptor {
    let entry = config.entry(&column.datatype);
    if entry.is_none() {
        tracing::debug!(
            field = %column.name,
            datatype = %column.datatype,
            "No type configuration for datatype"
        );
    }

    // Empty override strings defer to the configuration like absent ones
    let custom_type = custom
        .and_then(|c| c.input_type.clone())
        .filter(|t| !t.is_empty());
    let custom_class = custom
        .and_then(|c| c.class.clone())
        .filter(|c| !c.is_empty());

    FieldDescriptor {
        input_type: custom_type.or_else(|| entry.map(|e| e.input_type.clone())),
        class: custom_class.or_else(|| entry.map(|e| e.class.clone())),
        validation: entry.map(|e| e.validation.clone()),
        disabled: Disabled::Flag(custom.and_then(|c| c.disabled).unwrap_or(false)),
        length: column.length,
        ..FieldDescriptor::new(model, column.name.clone())
    }
}

/// Form generation entry point
///
/// Holds the loaded type configuration together with the schema source and
/// the record store the transforms look related rows up in.
///
/// # Examples
///
/// ```rust
/// use acton_schema_forms::config::FormsConfig;
/// use acton_schema_forms::forms::DynamicForms;
/// use acton_schema_forms::model::{DynamicModel, ModelMeta, Record};
/// use acton_schema_forms::schema::{ColumnMetadata, SchemaSnapshot};
/// use acton_schema_forms::store::MemoryStore;
///
/// let schema = SchemaSnapshot::new().with_table(
///     "users",
///     vec![
///         ColumnMetadata::new("id", "bigint"),
///         ColumnMetadata::new("name", "string").with_length(255),
///         ColumnMetadata::new("email", "email"),
///     ],
/// );
/// let forms = DynamicForms::new(FormsConfig::default(), schema, MemoryStore::new());
///
/// let user = DynamicModel::new(
///     ModelMeta::new("App\\User", "users").fillable(["name", "email"]),
///     Record::new().with("name", "Ada").with("email", "ada@example.com"),
/// );
///
/// let fields = forms.form(&user).unwrap().populate(&user, None, forms.store()).unwrap();
/// assert_eq!(fields.names().collect::<Vec<_>>(), vec!["name", "email"]);
///
/// let html = forms.render(&fields).unwrap();
/// assert!(html.contains(r#"value="ada@example.com""#));
/// ```
#[derive(Debug, Clone)]
pub struct DynamicForms<S, R> {
    config: Arc<FormsConfig>,
    schema: S,
    store: R,
}

impl<S, R> DynamicForms<S, R>
where
    S: SchemaSource,
    R: RecordStore,
{
    /// Create a form generator
    #[must_use]
    pub fn new(config: FormsConfig, schema: S, store: R) -> Self {
        Self::with_shared_config(Arc::new(config), schema, store)
    }

    /// Create a form generator sharing an already loaded configuration
    #[must_use]
    pub const fn with_shared_config(config: Arc<FormsConfig>, schema: S, store: R) -> Self {
        Self {
            config,
            schema,
            store,
        }
    }

    /// The type configuration
    #[must_use]
    pub fn config(&self) -> &FormsConfig {
        &self.config
    }

    /// The schema source
    #[must_use]
    pub const fn schema(&self) -> &S {
        &self.schema
    }

    /// The record store
    #[must_use]
    pub const fn store(&self) -> &R {
        &self.store
    }

    /// Build the field map for a model from a fresh schema read
    ///
    /// # Errors
    ///
    /// Propagates schema source failures, e.g. an unknown table.
    pub fn form<M>(&self, model: &M) -> FormResult<FieldMap>
    where
        M: Model + ?Sized,
    {
        let columns = self.schema.list_columns(model.table())?;
        let fields = build_fields(&columns, model, &self.config);
        tracing::debug!(
            model = %model.model_name(),
            table = %model.table(),
            columns = columns.len(),
            fields = fields.len(),
            "Built form fields"
        );
        Ok(fields)
    }

    /// Render fields with the built-in form template
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Render`](crate::error::FormError::Render) if the
    /// template fails.
    pub fn render(&self, fields: &FieldMap) -> FormResult<String> {
        FormView::new(fields, &self.config).render_html()
    }

    /// Render fields with a host-supplied template
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Template`](crate::error::FormError::Template) if
    /// the template fails.
    pub fn render_with(
        &self,
        renderer: &TemplateFormRenderer,
        fields: &FieldMap,
    ) -> FormResult<String> {
        renderer.render(fields, &self.config)
    }
}
