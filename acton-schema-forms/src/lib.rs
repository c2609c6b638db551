//! acton-schema-forms: Editable HTML forms generated from database column metadata
//!
//! Given a model's table columns and its mass-assignment rules, this crate
//! builds an ordered map of field descriptors, lets you reshape it with a few
//! chainable transforms, and renders it to HTML.
//!
//! # Design Principles
//!
//! 1. **Fail Closed**: only columns a model lets you write back become inputs
//! 2. **Convention Over Configuration**: datatype defaults cover most columns
//! 3. **Overrides Win**: a model's per-field overrides beat the defaults
//!
//! # Quick Start
//!
//! ```rust
//! use acton_schema_forms::prelude::*;
//!
//! # fn main() -> Result<(), FormError> {
//! let schema = SchemaSnapshot::new().with_table(
//!     "users",
//!     vec![
//!         ColumnMetadata::new("id", "bigint"),
//!         ColumnMetadata::new("email", "email"),
//!         ColumnMetadata::new("ssn", "string").with_length(11),
//!     ],
//! );
//! let forms = DynamicForms::new(FormsConfig::default(), schema, MemoryStore::new());
//!
//! let user = DynamicModel::new(
//!     ModelMeta::new("App\\User", "users")
//!         .fillable(["email", "ssn"])
//!         .guarded(["ssn"]),
//!     Record::new().with("email", "ada@example.com"),
//! );
//!
//! let fields = forms.form(&user)?.populate(&user, None, forms.store())?;
//! assert_eq!(fields.names().collect::<Vec<_>>(), vec!["email"]);
//!
//! let html = forms.render(&fields)?;
//! assert!(html.contains(r#"type="email" value="ada@example.com""#));
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `sqlite` - snapshot table columns from a `SQLite` pool (default)
//! - `postgres` - snapshot table columns from a `PostgreSQL` pool

pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod observability;
pub mod schema;
pub mod store;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use acton_schema_forms::prelude::*;
    //! ```

    pub use crate::config::{FormsConfig, TypeConfigEntry};
    pub use crate::error::{FormError, FormResult};
    pub use crate::forms::{
        build_fields, Disabled, DynamicForms, FieldDescriptor, FieldMap, FormView, Relation,
        TemplateFormRenderer, ValidationErrors,
    };
    pub use crate::model::{DynamicModel, FieldOverride, FieldOverrides, Model, ModelMeta, Record};
    pub use crate::schema::{ColumnMetadata, SchemaSnapshot, SchemaSource};
    pub use crate::store::{MemoryStore, RecordStore};
}
