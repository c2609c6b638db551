//! Form generation from schema metadata
//!
//! This module turns a model's table columns into an ordered [`FieldMap`]
//! and renders it:
//! - Exclusion of guarded, hidden, and non-fillable columns
//! - Per-field overrides from the model, falling back to the type configuration
//! - Chainable transforms: populate values, relation dropdowns, hide, disable
//! - Rule checking of submitted values
//!
//! # Quick Start
//!
//! ```rust
//! use acton_schema_forms::config::FormsConfig;
//! use acton_schema_forms::forms::{DynamicForms, Relation};
//! use acton_schema_forms::model::{DynamicModel, ModelMeta, Record};
//! use acton_schema_forms::schema::{ColumnMetadata, SchemaSnapshot};
//! use acton_schema_forms::store::MemoryStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaSnapshot::new()
//!     .with_table(
//!         "users",
//!         vec![
//!             ColumnMetadata::new("id", "bigint"),
//!             ColumnMetadata::new("name", "string").with_length(255),
//!             ColumnMetadata::new("password", "password"),
//!             ColumnMetadata::new("role_id", "bigint"),
//!         ],
//!     )
//!     .with_table("roles", vec![ColumnMetadata::new("id", "bigint")]);
//!
//! let store = MemoryStore::new().with_records(
//!     "App\\Role",
//!     vec![
//!         Record::new().with("id", 1).with("name", "Admin"),
//!         Record::new().with("id", 2).with("name", "Editor"),
//!     ],
//! );
//! let forms = DynamicForms::new(FormsConfig::default(), schema, store);
//!
//! let user = DynamicModel::new(
//!     ModelMeta::new("App\\User", "users").fillable(["name", "password", "role_id"]),
//!     Record::new().with("name", "Ada").with("role_id", 2),
//! );
//! let role = DynamicModel::new(
//!     ModelMeta::new("App\\Role", "roles"),
//!     Record::new().with("id", 2).with("name", "Editor"),
//! );
//!
//! let fields = forms
//!     .form(&user)?
//!     .populate(&user, None, forms.store())?
//!     .relation(&forms, &[Relation::new("role_id", &role)])?
//!     .hide(["password"])
//!     .disable(["name"]);
//!
//! let html = forms.render(&fields)?;
//! assert!(html.contains(r#"<option value="2" selected>Editor</option>"#));
//! assert!(!html.contains("password"));
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod field;
mod render;
mod rules;
mod template_render;
mod transform;

pub use builder::{build_fields, DynamicForms};
pub use error::{FieldError, ValidationErrors};
pub use field::{Disabled, FieldDescriptor, FieldMap};
pub use render::{FieldView, FormView, OptionView};
pub use template_render::TemplateFormRenderer;
pub use transform::Relation;
