//! PostgreSQL schema snapshots

use sqlx::PgPool;

use super::{normalize_declared_type, ColumnMetadata, SchemaSnapshot};
use crate::error::{FormError, FormResult};

impl SchemaSnapshot {
    /// Snapshot the given tables of the current PostgreSQL schema
    ///
    /// Reads `information_schema.columns` ordered by ordinal position.
    /// Character lengths come from `character_maximum_length`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Database`] if a query fails and
    /// [`FormError::Schema`] if a table has no columns (it does not exist).
    pub async fn from_postgres(pool: &PgPool, tables: &[&str]) -> FormResult<Self> {
        let mut snapshot = Self::new();

        for &table in tables {
            let rows: Vec<(String, String, Option<i32>)> = sqlx::query_as(
                "SELECT column_name::text, data_type::text, character_maximum_length::int4 \
                 FROM information_schema.columns \
                 WHERE table_schema = current_schema() AND table_name = $1 \
                 ORDER BY ordinal_position",
            )
            .bind(table)
            .fetch_all(pool)
            .await?;

            if rows.is_empty() {
                return Err(FormError::Schema(format!("unknown table '{table}'")));
            }

            let columns = rows
                .into_iter()
                .map(|(name, declared, max_length)| {
                    let (datatype, parsed) = normalize_declared_type(&declared);
                    let length = max_length
                        .and_then(|n| u32::try_from(n).ok())
                        .or(parsed);
                    ColumnMetadata {
                        name,
                        datatype,
                        length,
                    }
                })
                .collect::<Vec<_>>();

            tracing::debug!(table, columns = columns.len(), "Snapshotted PostgreSQL table");
            snapshot.insert(table, columns);
        }

        Ok(snapshot)
    }
}
