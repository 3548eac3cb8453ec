//! Per-operation result type.
//!
//! Every read distinguishes three cases: rows were found, something the read
//! depends on is absent, or the read failed. Callers collapse the latter two
//! into an empty response, but logging keeps them apart.

use radar_db::AcquireError;

use crate::error::QueryError;

/// Why a read produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// No snapshot file is available.
    NoSnapshot,
    /// The snapshot does not contain the named table.
    TableMissing(&'static str),
}

/// The result of a single read operation.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The read completed.
    Found(T),
    /// A dependency of the read is absent. Not an error.
    Absent(Absence),
    /// The snapshot could not be opened or the query failed.
    Failed(QueryError),
}

impl<T> Outcome<T> {
    /// Maps a failed acquisition to the matching outcome.
    pub fn from_acquire(err: AcquireError) -> Self {
        match err {
            AcquireError::NoSnapshot => Outcome::Absent(Absence::NoSnapshot),
            AcquireError::Open(e) => Outcome::Failed(QueryError::Open(e)),
        }
    }

    /// Returns the found value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the read failed (as opposed to finding or being absent).
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Emits one log line describing a non-success outcome.
    pub fn log(self, operation: &'static str) -> Self {
        match &self {
            Outcome::Found(_) => {}
            Outcome::Absent(Absence::NoSnapshot) => {
                tracing::info!(operation, "no snapshot available, returning empty result");
            }
            Outcome::Absent(Absence::TableMissing(table)) => {
                tracing::info!(operation, table, "table not found, returning empty result");
            }
            Outcome::Failed(QueryError::Open(e)) => {
                tracing::warn!(operation, "snapshot open failed, returning empty result: {}", e);
            }
            Outcome::Failed(QueryError::Database(e)) => {
                tracing::warn!(operation, "snapshot query failed, returning empty result: {}", e);
            }
        }
        self
    }
}

impl<T: Default> Outcome<T> {
    /// Degrades absence and failure to `T::default()`.
    pub fn unwrap_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

impl<T> From<rusqlite::Error> for Outcome<T> {
    fn from(err: rusqlite::Error) -> Self {
        Outcome::Failed(QueryError::Database(err))
    }
}
