//! Derived analysis records from the optional `ai_analysis` table.
//!
//! The column set belongs to the writer and changes between snapshots, so
//! rows are returned as opaque [`Row`] maps.

use radar_db::catalog;
use rusqlite::{params, Connection};

use crate::outcome::{Absence, Outcome};
use crate::row::{column_names, row_to_map, Row};

/// Table holding analysis records.
pub const ANALYSIS_TABLE: &str = "ai_analysis";

/// Number of analysis rows returned when the caller does not ask for a limit.
pub const DEFAULT_ANALYSIS_LIMIT: i64 = 20;

/// Reads the newest analysis rows, every column included.
pub fn fetch_analysis(conn: &Connection, limit: i64) -> Outcome<Vec<Row>> {
    match catalog::table_exists(conn, ANALYSIS_TABLE) {
        Ok(true) => {}
        Ok(false) => return Outcome::Absent(Absence::TableMissing(ANALYSIS_TABLE)),
        Err(e) => return e.into(),
    }

    match select_analysis(conn, limit.max(0)) {
        Ok(rows) => Outcome::Found(rows),
        Err(e) => e.into(),
    }
}

fn select_analysis(conn: &Connection, limit: i64) -> rusqlite::Result<Vec<Row>> {
    let mut stmt = conn.prepare("SELECT * FROM ai_analysis ORDER BY created_at DESC LIMIT ?1")?;
    let columns = column_names(&stmt);
    let rows = stmt
        .query_map(params![limit], |row| row_to_map(row, &columns))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
