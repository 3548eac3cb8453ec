//! Latest crawled trend items from the `news_items` table.

use radar_db::catalog;
use rusqlite::{Connection, ToSql};
use serde::Serialize;
use serde_json::Value;

use crate::outcome::{Absence, Outcome};
use crate::row::value_to_json;

/// Table holding crawled news items.
pub const NEWS_TABLE: &str = "news_items";

/// Number of trend items returned when the caller does not ask for a limit.
pub const DEFAULT_TRENDS_LIMIT: i64 = 50;

/// Parameters for a trends read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendQuery {
    /// Maximum number of rows to return.
    pub limit: i64,
    /// Exact platform identifier to filter on. Empty means no filter.
    pub source: Option<String>,
}

impl Default for TrendQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TRENDS_LIMIT,
            source: None,
        }
    }
}

/// A single trend item as served to clients.
///
/// Values keep whatever storage class the writer used, so an epoch-integer
/// timestamp comes through as a number rather than failing the read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendItem {
    pub id: Value,
    pub title: Value,
    pub url: Value,
    /// Platform identifier the item was crawled from.
    pub source: Value,
    /// Crawl timestamp, as stored by the writer.
    pub publish_time: Value,
}

/// Reads the newest trend items, optionally restricted to one source.
///
/// Rows are ordered by creation time, newest first. Both `source` and
/// `limit` are bound as parameters; a negative limit returns no rows.
pub fn fetch_trends(conn: &Connection, query: &TrendQuery) -> Outcome<Vec<TrendItem>> {
    match catalog::table_exists(conn, NEWS_TABLE) {
        Ok(true) => {}
        Ok(false) => return Outcome::Absent(Absence::TableMissing(NEWS_TABLE)),
        Err(e) => return e.into(),
    }

    match select_trends(conn, query) {
        Ok(items) => {
            tracing::debug!(rows = items.len(), "trends query returned rows");
            Outcome::Found(items)
        }
        Err(e) => e.into(),
    }
}

fn select_trends(conn: &Connection, query: &TrendQuery) -> rusqlite::Result<Vec<TrendItem>> {
    let mut sql = String::from(
        "SELECT id, title, url, platform_id AS source, created_at AS publish_time
         FROM news_items
         WHERE 1 = 1",
    );
    let source = query.source.as_deref().filter(|s| !s.is_empty());
    // SQLite treats a negative LIMIT as unbounded.
    let limit = query.limit.max(0);
    let mut params: Vec<&dyn ToSql> = Vec::with_capacity(2);

    if let Some(source) = &source {
        sql.push_str(" AND platform_id = ?");
        params.push(source);
    }
    sql.push_str(" ORDER BY created_at DESC LIMIT ?");
    params.push(&limit);

    let mut stmt = conn.prepare(&sql)?;
    let items = stmt
        .query_map(params.as_slice(), |row| {
            Ok(TrendItem {
                id: value_to_json(row.get_ref("id")?),
                title: value_to_json(row.get_ref("title")?),
                url: value_to_json(row.get_ref("url")?),
                source: value_to_json(row.get_ref("source")?),
                publish_time: value_to_json(row.get_ref("publish_time")?),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}
