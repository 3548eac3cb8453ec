//! Schema introspection helpers.
//!
//! Snapshot schemas are produced by an external writer and may drift between
//! files, so every query path checks table existence before touching a table.

use rusqlite::{params, Connection};
use serde::Serialize;

/// One row of `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    /// Column position.
    pub cid: i64,
    /// Column name.
    pub name: String,
    /// Declared type, empty when none was declared.
    #[serde(rename = "type")]
    pub decl_type: String,
    /// 1 if the column is `NOT NULL`.
    pub notnull: i64,
    /// Default value expression, as written in the schema.
    pub dflt_value: Option<String>,
    /// Position within the primary key, 0 if not part of it.
    pub pk: i64,
}

/// Returns whether a table named `name` exists.
///
/// # Errors
///
/// Returns the underlying SQLite error if the catalog cannot be read.
pub fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        params![name],
        |row| row.get(0),
    )
}

/// Lists table names in catalog order.
///
/// # Errors
///
/// Returns the underlying SQLite error if the catalog cannot be read.
pub fn list_tables(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Counts the rows of `table`.
///
/// # Errors
///
/// Returns the underlying SQLite error if the table cannot be read.
pub fn count_rows(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    let sql = format!("SELECT count(*) FROM {}", quote_ident(table));
    conn.query_row(&sql, [], |row| row.get(0))
}

/// Returns the column layout of `table`. Unknown tables yield an empty list.
///
/// # Errors
///
/// Returns the underlying SQLite error if the pragma fails.
pub fn table_info(conn: &Connection, table: &str) -> rusqlite::Result<Vec<ColumnInfo>> {
    let mut stmt =
        conn.prepare("SELECT cid, name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map(params![table], |row| {
            Ok(ColumnInfo {
                cid: row.get(0)?,
                name: row.get(1)?,
                decl_type: row.get(2)?,
                notnull: row.get(3)?,
                dflt_value: row.get(4)?,
                pk: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

/// Quotes an identifier for interpolation into SQL text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
