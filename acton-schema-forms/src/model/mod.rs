//! Data models as seen by the form builder
//!
//! A model exposes its table, its mass-assignment sets (`fillable`,
//! `guarded`, `hidden`), its current attribute values, and optionally a
//! per-field override table. Only the fields a model lets you write back are
//! ever offered as inputs.
//!
//! # Examples
//!
//! ```rust
//! use acton_schema_forms::model::{FieldOverride, FieldOverrides, Model, ModelMeta};
//!
//! struct User {
//!     meta: ModelMeta,
//!     overrides: FieldOverrides,
//!     name: String,
//! }
//!
//! impl Model for User {
//!     fn meta(&self) -> &ModelMeta {
//!         &self.meta
//!     }
//!
//!     fn attribute(&self, name: &str) -> Option<String> {
//!         (name == "name").then(|| self.name.clone())
//!     }
//!
//!     fn custom_fields(&self) -> Option<&FieldOverrides> {
//!         Some(&self.overrides)
//!     }
//! }
//!
//! let mut overrides = FieldOverrides::new();
//! overrides.insert("name".into(), FieldOverride::new().class("form-control custom"));
//!
//! let user = User {
//!     meta: ModelMeta::new("App\\User", "users").fillable(["name"]),
//!     overrides,
//!     name: "Ada".into(),
//! };
//! assert!(user.meta().exclusion("name").is_none());
//! ```

mod record;

pub use record::{DynamicModel, Record};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wildcard guard entry
///
/// A guard list of just `["*"]` is the ORM's default shape, where `fillable`
/// alone decides what can be written back.
pub const GUARD_ALL: &str = "*";

/// Per-field override table keyed by field name
pub type FieldOverrides = IndexMap<String, FieldOverride>;

/// Presentation overrides for a single field
///
/// Any attribute left as `None` defers to the type configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOverride {
    /// Input type to use instead of the configured one
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// CSS class to use instead of the configured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Render the input disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl FieldOverride {
    /// Create an empty override
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the input type
    #[must_use]
    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    /// Override the CSS class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Override the disabled flag
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }
}

/// Why a column was left out of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Protected by the model's guard and the guard is not lifted
    Guarded,
    /// Listed in the model's hidden set
    Hidden,
    /// Not listed in the model's fillable set
    NotFillable,
}

impl Exclusion {
    /// Short label used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guarded => "guarded",
            Self::Hidden => "hidden",
            Self::NotFillable => "not fillable",
        }
    }
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity and mass-assignment metadata of a model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMeta {
    /// Qualified model name (e.g. `App\User`), used to look related records up
    pub name: String,
    /// Backing table
    pub table: String,
    /// Attributes that may be mass-assigned
    pub fillable: Vec<String>,
    /// Attributes protected from mass assignment (`["*"]` defers to `fillable`)
    pub guarded: Vec<String>,
    /// Attributes never exposed
    pub hidden: Vec<String>,
    /// Whether the mass-assignment guard has been lifted
    pub unguarded: bool,
}

impl ModelMeta {
    /// Create metadata for a model bound to `table`
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            ..Self::default()
        }
    }

    /// Set the fillable attributes
    #[must_use]
    pub fn fillable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fillable = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the guarded attributes
    #[must_use]
    pub fn guarded<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.guarded = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the hidden attributes
    #[must_use]
    pub fn hidden<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Lift the mass-assignment guard
    #[must_use]
    pub const fn unguarded(mut self) -> Self {
        self.unguarded = true;
        self
    }

    /// Whether the guard list is the bare wildcard `["*"]`
    #[must_use]
    pub fn is_guard_all(&self) -> bool {
        matches!(self.guarded.as_slice(), [only] if only == GUARD_ALL)
    }

    /// Whether `field` is named in the guard list
    #[must_use]
    pub fn is_guarded(&self, field: &str) -> bool {
        self.guarded.iter().any(|g| g == field)
    }

    /// Whether `field` is hidden
    #[must_use]
    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden.iter().any(|h| h == field)
    }

    /// Whether `field` is fillable
    #[must_use]
    pub fn is_fillable(&self, field: &str) -> bool {
        self.fillable.iter().any(|f| f == field)
    }

    /// Decide whether `field` is left out of generated forms
    ///
    /// Rules apply in order and the first match wins: named in `guarded`
    /// (unless the guard list is the bare wildcard or the guard is lifted),
    /// hidden, then not fillable. A field named in none of the sets is
    /// excluded.
    #[must_use]
    pub fn exclusion(&self, field: &str) -> Option<Exclusion> {
        if self.is_guarded(field) && !self.is_guard_all() && !self.unguarded {
            return Some(Exclusion::Guarded);
        }
        if self.is_hidden(field) {
            return Some(Exclusion::Hidden);
        }
        if !self.is_fillable(field) {
            return Some(Exclusion::NotFillable);
        }
        None
    }
}

/// A data model instance a form can be generated for
pub trait Model {
    /// Identity and mass-assignment metadata
    fn meta(&self) -> &ModelMeta;

    /// Current value of an attribute, rendered as text
    ///
    /// `None` when the attribute is unset or null.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Optional per-field override table
    ///
    /// Models that need to customise individual inputs return `Some`.
    fn custom_fields(&self) -> Option<&FieldOverrides> {
        None
    }

    /// Qualified model name
    fn model_name(&self) -> &str {
        &self.meta().name
    }

    /// Backing table
    fn table(&self) -> &str {
        &self.meta().table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ModelMeta {
        ModelMeta::new("App\\User", "users")
            .fillable(["name", "email", "ssn", "password"])
            .guarded(["ssn"])
            .hidden(["password"])
    }

    #[test]
    fn test_fillable_field_included() {
        assert_eq!(meta().exclusion("name"), None);
    }

    #[test]
    fn test_guarded_field_excluded_even_if_fillable() {
        assert_eq!(meta().exclusion("ssn"), Some(Exclusion::Guarded));
    }

    #[test]
    fn test_unguarded_model_falls_through_to_later_rules() {
        let meta = meta().unguarded();
        assert_eq!(meta.exclusion("ssn"), None);
        assert_eq!(meta.exclusion("password"), Some(Exclusion::Hidden));
    }

    #[test]
    fn test_hidden_field_excluded() {
        assert_eq!(meta().exclusion("password"), Some(Exclusion::Hidden));
    }

    #[test]
    fn test_unlisted_field_fails_closed() {
        assert_eq!(meta().exclusion("created_at"), Some(Exclusion::NotFillable));
    }

    #[test]
    fn test_wildcard_guard_defers_to_fillable() {
        let meta = ModelMeta::new("App\\Log", "logs")
            .fillable(["message"])
            .hidden(["token"])
            .guarded([GUARD_ALL]);
        assert!(meta.is_guard_all());
        assert_eq!(meta.exclusion("message"), None);
        assert_eq!(meta.exclusion("token"), Some(Exclusion::Hidden));
        assert_eq!(meta.exclusion("level"), Some(Exclusion::NotFillable));
    }

    #[test]
    fn test_wildcard_alongside_names_still_guards_named_fields() {
        let meta = ModelMeta::new("App\\Log", "logs")
            .fillable(["message", "ip"])
            .guarded([GUARD_ALL, "ip"]);
        assert!(!meta.is_guard_all());
        assert_eq!(meta.exclusion("message"), None);
        assert_eq!(meta.exclusion("ip"), Some(Exclusion::Guarded));
    }

    #[test]
    fn test_override_deserializes_type_key() {
        let json = r#"{"type": "textarea", "disabled": true}"#;
        let over: FieldOverride = serde_json::from_str(json).unwrap();
        assert_eq!(over, FieldOverride::new().input_type("textarea").disabled(true));
    }
}
