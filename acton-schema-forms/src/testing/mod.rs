//! Test fixtures shared across module tests
//!
//! - [`user_meta`] / [`user_columns`]: a user model with one column per
//!   exclusion rule and per configured datatype
//! - [`create_sqlite_pool`]: a single-connection in-memory SQLite pool

use crate::model::ModelMeta;
use crate::schema::ColumnMetadata;

/// A user model: `ssn` is guarded, `remember_token` hidden, `id` unlisted
pub fn user_meta() -> ModelMeta {
    ModelMeta::new("App\\User", "users")
        .fillable([
            "name",
            "email",
            "password",
            "ssn",
            "born_on",
            "role_id",
            "remember_token",
        ])
        .guarded(["ssn"])
        .hidden(["remember_token"])
}

/// Columns of the `users` table in declaration order
pub fn user_columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("id", "bigint"),
        ColumnMetadata::new("name", "string").with_length(255),
        ColumnMetadata::new("email", "email"),
        ColumnMetadata::new("password", "password"),
        ColumnMetadata::new("ssn", "string").with_length(11),
        ColumnMetadata::new("born_on", "date"),
        ColumnMetadata::new("role_id", "bigint"),
        ColumnMetadata::new("remember_token", "string").with_length(100),
    ]
}

/// In-memory SQLite pool
///
/// Limited to one connection since every `sqlite::memory:` connection opens
/// its own database.
#[cfg(feature = "sqlite")]
pub async fn create_sqlite_pool() -> Result<sqlx::SqlitePool, sqlx::Error> {
    sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
}
