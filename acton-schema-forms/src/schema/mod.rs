//! Column metadata and schema sources
//!
//! The form builder never talks to a database directly. It asks a
//! [`SchemaSource`] for the columns of a table, in declaration order. Hosts can
//! implement the trait over their own ORM, pass a closure, or take a
//! [`SchemaSnapshot`] of a live database up front with the sqlx loaders.
//!
//! # Examples
//!
//! ```rust
//! use acton_schema_forms::schema::{ColumnMetadata, SchemaSnapshot, SchemaSource};
//!
//! let schema = SchemaSnapshot::new().with_table(
//!     "users",
//!     vec![
//!         ColumnMetadata::new("name", "string").with_length(255),
//!         ColumnMetadata::new("email", "email"),
//!     ],
//! );
//!
//! let columns = schema.list_columns("users").unwrap();
//! assert_eq!(columns[0].length, Some(255));
//! ```

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "sqlite")]
mod sqlite;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, FormResult};

/// One column as reported by schema introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,
    /// Storage datatype name, resolved against the type configuration
    pub datatype: String,
    /// Declared maximum length, if any
    #[serde(default)]
    pub length: Option<u32>,
}

impl ColumnMetadata {
    /// Create column metadata without a length
    #[must_use]
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
            length: None,
        }
    }

    /// Set the declared maximum length
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

/// Supplies column metadata for a table
///
/// Columns must be returned in declaration order; the generated form keeps it.
pub trait SchemaSource {
    /// List the columns of `table`
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Schema`] if the table is unknown or the
    /// underlying introspection fails.
    fn list_columns(&self, table: &str) -> FormResult<Vec<ColumnMetadata>>;
}

impl<F> SchemaSource for F
where
    F: Fn(&str) -> FormResult<Vec<ColumnMetadata>>,
{
    fn list_columns(&self, table: &str) -> FormResult<Vec<ColumnMetadata>> {
        self(table)
    }
}

/// In-memory table → columns listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    tables: IndexMap<String, Vec<ColumnMetadata>>,
}

impl SchemaSnapshot {
    /// Create an empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        self.insert(table, columns);
        self
    }

    /// Add or replace a table in place
    pub fn insert(&mut self, table: impl Into<String>, columns: Vec<ColumnMetadata>) {
        self.tables.insert(table.into(), columns);
    }

    /// Names of the tables in this snapshot
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Whether the snapshot describes `table`
    #[must_use]
    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }
}

impl SchemaSource for SchemaSnapshot {
    fn list_columns(&self, table: &str) -> FormResult<Vec<ColumnMetadata>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| FormError::Schema(format!("unknown table '{table}'")))
    }
}

/// Map a declared SQL column type onto a storage datatype name
///
/// Character types become `string` and carry their declared length, e.g.
/// `VARCHAR(255)` yields `("string", Some(255))`. Types outside the known
/// families pass through lower-cased so hosts can still configure them.
#[must_use]
pub fn normalize_declared_type(declared: &str) -> (String, Option<u32>) {
    let lower = declared.trim().to_ascii_lowercase();
    let (base, args) = match lower.split_once('(') {
        Some((base, rest)) => (base.trim(), Some(rest.trim_end_matches(')'))),
        None => (lower.as_str(), None),
    };

    let datatype = if base.is_empty() || base.contains("char") {
        "string"
    } else if base.contains("text") || base.contains("clob") {
        "text"
    } else {
        match base {
            "bigint" | "int8" | "bigserial" | "unsigned big int" => "bigint",
            "smallint" | "int2" | "tinyint" | "smallserial" => "smallint",
            "integer" | "int" | "int4" | "serial" | "mediumint" => "integer",
            "boolean" | "bool" => "boolean",
            "date" => "date",
            "real" | "float" | "float4" | "float8" | "double" | "double precision" => "float",
            "decimal" | "numeric" => "decimal",
            b if b.starts_with("datetime") || b.starts_with("timestamp") => "datetime",
            b if b.starts_with("time") => "time",
            other => other,
        }
    };

    let length = if datatype == "string" {
        args.and_then(|a| a.split(',').next())
            .and_then(|n| n.trim().parse::<u32>().ok())
    } else {
        None
    };

    (datatype.to_string(), length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_preserves_column_order() {
        let schema = SchemaSnapshot::new().with_table(
            "users",
            vec![
                ColumnMetadata::new("id", "bigint"),
                ColumnMetadata::new("name", "string").with_length(255),
                ColumnMetadata::new("born_on", "date"),
            ],
        );

        let names: Vec<String> = schema
            .list_columns("users")
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["id", "name", "born_on"]);
    }

    #[test]
    fn test_snapshot_unknown_table() {
        let schema = SchemaSnapshot::new();
        let err = schema.list_columns("missing").unwrap_err();
        assert!(matches!(err, FormError::Schema(_)));
    }

    #[test]
    fn test_closure_source() {
        let source = |table: &str| -> FormResult<Vec<ColumnMetadata>> {
            Ok(vec![ColumnMetadata::new(format!("{table}_name"), "string")])
        };
        let columns = source.list_columns("roles").unwrap();
        assert_eq!(columns[0].name, "roles_name");
    }

    #[test]
    fn test_normalize_character_types() {
        assert_eq!(
            normalize_declared_type("VARCHAR(255)"),
            ("string".to_string(), Some(255))
        );
        assert_eq!(
            normalize_declared_type("character varying"),
            ("string".to_string(), None)
        );
        assert_eq!(normalize_declared_type("TEXT"), ("text".to_string(), None));
        assert_eq!(normalize_declared_type(""), ("string".to_string(), None));
    }

    #[test]
    fn test_normalize_numeric_and_temporal_types() {
        assert_eq!(normalize_declared_type("BIGINT").0, "bigint");
        assert_eq!(normalize_declared_type("integer").0, "integer");
        assert_eq!(normalize_declared_type("DECIMAL(10,2)"), ("decimal".to_string(), None));
        assert_eq!(normalize_declared_type("date").0, "date");
        assert_eq!(normalize_declared_type("DATETIME").0, "datetime");
        assert_eq!(
            normalize_declared_type("timestamp without time zone").0,
            "datetime"
        );
        assert_eq!(normalize_declared_type("time").0, "time");
        assert_eq!(normalize_declared_type("double precision").0, "float");
    }

    #[test]
    fn test_normalize_passes_unknown_through() {
        assert_eq!(normalize_declared_type("JSONB"), ("jsonb".to_string(), None));
    }
}
