//! Read-only schema introspection backed by SQLite's pragma functions.

use crate::error::SchemaError;
use serde::Serialize;
use sqlx::SqliteConnection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    /// 1-based position within the primary key, 0 when not part of it.
    pub primary_key: i64,
}

pub async fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool, SchemaError> {
    let rec: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_one(&mut *conn)
            .await?;
    Ok(rec.0 > 0)
}

/// Columns in declaration order. Empty when the table does not exist.
pub async fn table_columns(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<ColumnInfo>, SchemaError> {
    let rows: Vec<(String, String, i64, i64)> = sqlx::query_as(
        r#"SELECT name, type, "notnull", pk FROM pragma_table_info(?) ORDER BY cid"#,
    )
    .bind(table)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(name, declared_type, not_null, primary_key)| ColumnInfo {
            name,
            declared_type,
            not_null: not_null != 0,
            primary_key,
        })
        .collect())
}

/// Indexes created with `CREATE INDEX`, sorted by name.
pub async fn index_names(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<String>, SchemaError> {
    indexes_by_origin(conn, table, "c").await
}

/// Indexes SQLite created to back UNIQUE constraints.
pub async fn unique_indexes(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<String>, SchemaError> {
    indexes_by_origin(conn, table, "u").await
}

/// Columns covered by the named index, in index order.
pub async fn index_columns(
    conn: &mut SqliteConnection,
    index: &str,
) -> Result<Vec<String>, SchemaError> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM pragma_index_info(?) ORDER BY seqno")
            .bind(index)
            .fetch_all(&mut *conn)
            .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

async fn indexes_by_origin(
    conn: &mut SqliteConnection,
    table: &str,
    origin: &str,
) -> Result<Vec<String>, SchemaError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM pragma_index_list(?) WHERE origin = ? ORDER BY name",
    )
    .bind(table)
    .bind(origin)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

pub async fn row_count(conn: &mut SqliteConnection, table: &str) -> Result<i64, SchemaError> {
    // Identifiers cannot be bound; callers pass names from `Entity::table_name`.
    let sql = format!(r#"SELECT COUNT(*) FROM "{}""#, table.replace('"', "\"\""));
    let rec: (i64,) = sqlx::query_as(&sql).fetch_one(&mut *conn).await?;
    Ok(rec.0)
}

pub async fn user_version(conn: &mut SqliteConnection) -> Result<i64, SchemaError> {
    let rec: (i64,) = sqlx::query_as("PRAGMA user_version")
        .fetch_one(&mut *conn)
        .await?;
    Ok(rec.0)
}
