//! SQLite schema snapshots

use sqlx::SqlitePool;

use super::{normalize_declared_type, ColumnMetadata, SchemaSnapshot};
use crate::error::{FormError, FormResult};

impl SchemaSnapshot {
    /// Snapshot the given tables of a SQLite database
    ///
    /// Reads `pragma_table_info` for each table and normalizes declared
    /// types with [`normalize_declared_type`].
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Database`] if a query fails and
    /// [`FormError::Schema`] if a table has no columns (it does not exist).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use acton_schema_forms::schema::SchemaSnapshot;
    ///
    /// # async fn example(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
    /// let schema = SchemaSnapshot::from_sqlite(&pool, &["users", "roles"]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_sqlite(pool: &SqlitePool, tables: &[&str]) -> FormResult<Self> {
        let mut snapshot = Self::new();

        for &table in tables {
            let rows: Vec<(String, String)> =
                sqlx::query_as("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")
                    .bind(table)
                    .fetch_all(pool)
                    .await?;

            if rows.is_empty() {
                return Err(FormError::Schema(format!("unknown table '{table}'")));
            }

            let columns = rows
                .into_iter()
                .map(|(name, declared)| {
                    let (datatype, length) = normalize_declared_type(&declared);
                    ColumnMetadata {
                        name,
                        datatype,
                        length,
                    }
                })
                .collect::<Vec<_>>();

            tracing::debug!(table, columns = columns.len(), "Snapshotted SQLite table");
            snapshot.insert(table, columns);
        }

        Ok(snapshot)
    }
}
