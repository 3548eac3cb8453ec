//! Snapshot diagnostics for the debug endpoint.
//!
//! Collection never fails outright. Row counts are isolated per table, and
//! any later failure is reported next to whatever was gathered before it.

use std::collections::BTreeMap;

use radar_db::{
    catalog, AcquireError, ColumnInfo, DbRuntimeSettings, SnapshotConnection, SnapshotResolver,
};
use serde::{Serialize, Serializer};

use crate::row::{column_names, row_to_map, Row};
use crate::trends::NEWS_TABLE;

/// Row count for one table, or a marker that counting it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCount {
    Rows(i64),
    Error,
}

impl Serialize for TableCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TableCount::Rows(n) => serializer.serialize_i64(*n),
            TableCount::Error => serializer.serialize_str("error"),
        }
    }
}

/// What was learned about the current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebugReport {
    pub db_path: Option<String>,
    pub tables: Vec<String>,
    pub counts: BTreeMap<String, TableCount>,
    pub schema_news: Vec<ColumnInfo>,
    pub first_row_news: Option<Row>,
}

/// Response body of the debug endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Diagnostics {
    /// Every diagnostic step completed.
    Report(DebugReport),

    /// No connection could be made to a snapshot.
    Unavailable {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
        db_dir_exists: bool,
        db_files: Vec<String>,
    },

    /// A step failed after the connection was made.
    Failed {
        error: String,
        trace: String,
        #[serde(flatten)]
        partial: DebugReport,
    },
}

/// Resolves the latest snapshot and collects diagnostics for it.
pub fn diagnose(resolver: &SnapshotResolver, settings: DbRuntimeSettings) -> Diagnostics {
    match radar_db::acquire(resolver, settings) {
        Ok(snapshot) => collect_diagnostics(&snapshot),
        Err(err) => {
            let detail = match &err {
                AcquireError::NoSnapshot => None,
                AcquireError::Open(e) => Some(e.to_string()),
            };
            Diagnostics::Unavailable {
                error: "No connection".to_string(),
                detail,
                db_dir_exists: resolver.dir_exists(),
                db_files: resolver
                    .candidates()
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            }
        }
    }
}

/// Collects table names, per-table counts and the layout and first row of
/// the news table.
pub fn collect_diagnostics(snapshot: &SnapshotConnection) -> Diagnostics {
    let mut report = DebugReport {
        db_path: Some(snapshot.path().display().to_string()),
        ..DebugReport::default()
    };

    match fill_report(snapshot, &mut report) {
        Ok(()) => Diagnostics::Report(report),
        Err(err) => {
            tracing::warn!(
                snapshot = %snapshot.path().display(),
                "diagnostic collection failed: {}",
                err
            );
            Diagnostics::Failed {
                error: err.to_string(),
                trace: format!("{err:?}"),
                partial: report,
            }
        }
    }
}

fn fill_report(snapshot: &SnapshotConnection, report: &mut DebugReport) -> rusqlite::Result<()> {
    let conn = snapshot.conn();
    report.tables = catalog::list_tables(conn)?;

    for table in &report.tables {
        let count = match catalog::count_rows(conn, table) {
            Ok(n) => TableCount::Rows(n),
            Err(e) => {
                tracing::debug!(table = %table, "row count failed: {}", e);
                TableCount::Error
            }
        };
        report.counts.insert(table.clone(), count);
    }

    if report.tables.iter().any(|t| t == NEWS_TABLE) {
        report.schema_news = catalog::table_info(conn, NEWS_TABLE)?;

        let mut stmt = conn.prepare("SELECT * FROM news_items LIMIT 1")?;
        let columns = column_names(&stmt);
        let mut rows = stmt.query([])?;
        report.first_row_news = match rows.next()? {
            Some(row) => Some(row_to_map(row, &columns)?),
            None => None,
        };
    }

    Ok(())
}
