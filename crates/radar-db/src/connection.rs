//! Read-only connections to snapshot files.
//!
//! Every request opens its own connection and drops it as soon as its single
//! query finishes. There is no pool: snapshots rotate underneath the server,
//! and a long-lived connection would pin a stale file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::resolver::SnapshotResolver;

/// Runtime tunables for snapshot connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
        }
    }
}

/// Errors that can occur when opening a snapshot file.
#[derive(Debug, Error)]
#[error("failed to open snapshot {}: {source}", .path.display())]
pub struct OpenError {
    /// The snapshot that could not be opened.
    pub path: PathBuf,
    /// The underlying SQLite error.
    #[source]
    pub source: rusqlite::Error,
}

/// Errors that can occur when acquiring a connection to the latest snapshot.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// No snapshot file exists in the configured directory.
    #[error("no snapshot available")]
    NoSnapshot,

    /// A snapshot exists but could not be opened.
    #[error(transparent)]
    Open(#[from] OpenError),
}

/// An open connection paired with the snapshot it reads.
///
/// Dropping this value closes the connection.
#[derive(Debug)]
pub struct SnapshotConnection {
    path: PathBuf,
    conn: Connection,
}

impl SnapshotConnection {
    /// The snapshot file this connection reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Opens a snapshot file in read-only mode.
///
/// The schema version is probed immediately so that corrupt files, non-database
/// files and locked files fail here rather than halfway through a query.
///
/// # Errors
///
/// Returns `OpenError` if the file cannot be opened or is not a readable
/// SQLite database.
pub fn open_snapshot(path: &Path, settings: DbRuntimeSettings) -> Result<Connection, OpenError> {
    let wrap = |source| OpenError {
        path: path.to_path_buf(),
        source,
    };

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(wrap)?;
    conn.busy_timeout(Duration::from_millis(settings.busy_timeout_ms))
        .map_err(wrap)?;
    conn.query_row("PRAGMA schema_version;", [], |row| row.get::<_, i64>(0))
        .map_err(wrap)?;

    Ok(conn)
}

/// Resolves the latest snapshot and opens it.
///
/// # Errors
///
/// Returns `AcquireError::NoSnapshot` when nothing resolves and
/// `AcquireError::Open` when the resolved file cannot be opened.
pub fn acquire(
    resolver: &SnapshotResolver,
    settings: DbRuntimeSettings,
) -> Result<SnapshotConnection, AcquireError> {
    let path = resolver.resolve().ok_or(AcquireError::NoSnapshot)?;
    let conn = open_snapshot(&path, settings)?;
    Ok(SnapshotConnection { path, conn })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_valid_snapshot_read_only() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("2024-01-01.db");
        Connection::open(&path)
            .and_then(|c| c.execute_batch("CREATE TABLE t (x INTEGER);"))
            .expect("should seed snapshot");

        let conn = open_snapshot(&path, DbRuntimeSettings::default())
            .expect("open should succeed");
        let err = conn
            .execute("INSERT INTO t (x) VALUES (1)", [])
            .expect_err("writes should be rejected");
        assert!(
            err.to_string().contains("readonly"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn busy_timeout_matches_settings() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("a.db");
        Connection::open(&path)
            .and_then(|c| c.execute_batch("CREATE TABLE t (x INTEGER);"))
            .expect("should seed snapshot");

        let conn = open_snapshot(&path, DbRuntimeSettings { busy_timeout_ms: 1_250 })
            .expect("open should succeed");
        let timeout: i64 = conn
            .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
            .expect("should query busy_timeout");
        assert_eq!(timeout, 1_250);
    }

    #[test]
    fn corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("broken.db");
        std::fs::write(&path, "not a sqlite database\n".repeat(64))
            .expect("should write garbage");

        let err = open_snapshot(&path, DbRuntimeSettings::default())
            .expect_err("garbage should not open");
        assert_eq!(err.path, path);
    }

    #[test]
    fn acquire_without_snapshot_reports_absence() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let resolver = SnapshotResolver::new(dir.path());

        match acquire(&resolver, DbRuntimeSettings::default()) {
            Err(AcquireError::NoSnapshot) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn acquire_opens_latest_snapshot() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        for name in ["2024-01-01.db", "2024-02-01.db"] {
            Connection::open(dir.path().join(name))
                .and_then(|c| c.execute_batch("CREATE TABLE t (x INTEGER);"))
                .expect("should seed snapshot");
        }

        let snapshot = acquire(&SnapshotResolver::new(dir.path()), DbRuntimeSettings::default())
            .expect("acquire should succeed");
        assert_eq!(snapshot.path(), dir.path().join("2024-02-01.db"));
    }
}
