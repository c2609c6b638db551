//! Type configuration for generated forms
//!
//! Maps a column's storage datatype (as reported by schema introspection) to
//! the presentation defaults of the input rendered for it. Configuration is
//! loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `DYNAMIC_FORMS_` prefix, `__` for nesting)
//! 2. `./dynamicforms.toml` (or an explicit file via [`FormsConfig::load_from`])
//! 3. Hardcoded defaults (fallback)
//!
//! Sources are merged key by key, so a host file only needs the entries it
//! changes or adds.
//!
//! # Example Configuration
//!
//! ```toml
//! # dynamicforms.toml
//! [css]
//! submit = "btn btn-primary"
//!
//! [generate.text]
//! type = "text"
//! class = "form-control"
//! validation = "string"
//!
//! [generate.string]
//! class = "form-control form-control-sm"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use acton_schema_forms::config::FormsConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = FormsConfig::load()?;
//!
//! let input = config.entry("email").map(|e| e.input_type.as_str());
//! assert_eq!(input, Some("email"));
//! # Ok(())
//! # }
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dynamicforms.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "DYNAMIC_FORMS_";

/// Errors raised while loading or validating the type configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or the merged document did not deserialize
    #[error("Configuration error: {0}")]
    Load(#[from] figment::Error),

    /// A `generate` table was declared with an empty or padded datatype key
    #[error("Configuration error: invalid datatype key '{0}'")]
    InvalidDatatype(String),

    /// A `generate` entry has no input type
    #[error("Configuration error: datatype '{0}' has an empty input type")]
    MissingInputType(String),
}

/// CSS classes for elements outside individual fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssSettings {
    /// Class of the trailing submit button
    pub submit: String,
}

impl Default for CssSettings {
    fn default() -> Self {
        Self {
            submit: "btn btn-danger btn-rounded btn-custom btn-block waves-effect waves-light"
                .to_string(),
        }
    }
}

/// Presentation defaults for one storage datatype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfigEntry {
    /// HTML input type (`text`, `select`, `date`, ...)
    #[serde(rename = "type", default)]
    pub input_type: String,

    /// CSS class applied to the input
    #[serde(default)]
    pub class: String,

    /// Validation rule string, `|`-separated (e.g. `integer`, `date_format:Y-m-d`)
    #[serde(default)]
    pub validation: String,
}

impl TypeConfigEntry {
    /// Create an entry
    #[must_use]
    pub fn new(
        input_type: impl Into<String>,
        class: impl Into<String>,
        validation: impl Into<String>,
    ) -> Self {
        Self {
            input_type: input_type.into(),
            class: class.into(),
            validation: validation.into(),
        }
    }
}

/// Complete form generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Non-field CSS classes
    pub css: CssSettings,

    /// Datatype name to presentation defaults
    pub generate: IndexMap<String, TypeConfigEntry>,
}

impl Default for FormsConfig {
    fn default() -> Self {
        let mut generate = IndexMap::new();
        // `string` is the validator rule, `text` is the input
        generate.insert(
            "string".to_string(),
            TypeConfigEntry::new("text", "form-control", "string"),
        );
        generate.insert(
            "bigint".to_string(),
            TypeConfigEntry::new("select", "form-control", "integer"),
        );
        generate.insert(
            "date".to_string(),
            TypeConfigEntry::new("date", "form-control", "date_format:Y-m-d"),
        );
        generate.insert(
            "email".to_string(),
            TypeConfigEntry::new("email", "form-control", ""),
        );
        generate.insert(
            "password".to_string(),
            TypeConfigEntry::new("password", "form-control", ""),
        );

        Self {
            css: CssSettings::default(),
            generate,
        }
    }
}

impl FormsConfig {
    /// Load configuration from defaults, `./dynamicforms.toml`, and the environment
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from a specific file merged over the defaults
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use acton_schema_forms::config::FormsConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = FormsConfig::load_from("./config/forms.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(path))
    }

    /// Provider chain used by [`load`](Self::load) and [`load_from`](Self::load_from)
    ///
    /// Exposed so hosts can merge in their own providers before extraction.
    #[must_use]
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate configuration from an arbitrary figment
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        tracing::debug!(
            datatypes = config.generate.len(),
            "Loaded form type configuration"
        );
        Ok(config)
    }

    /// Check that every datatype key and entry is usable
    ///
    /// Runs once at load time so per-field lookups never have to.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (datatype, entry) in &self.generate {
            if datatype.is_empty() || datatype.trim() != datatype || datatype.contains(' ') {
                return Err(ConfigError::InvalidDatatype(datatype.clone()));
            }
            if entry.input_type.trim().is_empty() {
                return Err(ConfigError::MissingInputType(datatype.clone()));
            }
        }
        Ok(())
    }

    /// Look up the defaults for a storage datatype
    #[must_use]
    pub fn entry(&self, datatype: &str) -> Option<&TypeConfigEntry> {
        self.generate.get(datatype)
    }

    /// Register or replace the defaults for a datatype
    #[must_use]
    pub fn with_type(mut self, datatype: impl Into<String>, entry: TypeConfigEntry) -> Self {
        self.generate.insert(datatype.into(), entry);
        self
    }
}
