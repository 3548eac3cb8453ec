//! The per-request query service.
//!
//! Each call resolves the latest snapshot, opens a private read-only
//! connection, runs exactly one read and drops the connection before
//! returning. Nothing is cached between calls.

use std::path::PathBuf;

use radar_db::{DbRuntimeSettings, SnapshotResolver};

use crate::analysis::fetch_analysis;
use crate::diagnostics::{diagnose, Diagnostics};
use crate::outcome::Outcome;
use crate::row::Row;
use crate::trends::{fetch_trends, TrendItem, TrendQuery};

/// Answers read requests against whichever snapshot is current.
#[derive(Debug, Clone)]
pub struct QueryService {
    resolver: SnapshotResolver,
    settings: DbRuntimeSettings,
}

impl QueryService {
    pub fn new(resolver: SnapshotResolver, settings: DbRuntimeSettings) -> Self {
        Self { resolver, settings }
    }

    pub fn resolver(&self) -> &SnapshotResolver {
        &self.resolver
    }

    /// The snapshot a read issued now would use.
    pub fn current_snapshot(&self) -> Option<PathBuf> {
        self.resolver.resolve()
    }

    /// Newest trend items from the current snapshot.
    pub fn trends(&self, query: &TrendQuery) -> Outcome<Vec<TrendItem>> {
        match radar_db::acquire(&self.resolver, self.settings) {
            Ok(snapshot) => fetch_trends(snapshot.conn(), query),
            Err(err) => Outcome::from_acquire(err),
        }
    }

    /// Newest analysis rows from the current snapshot.
    pub fn analysis(&self, limit: i64) -> Outcome<Vec<Row>> {
        match radar_db::acquire(&self.resolver, self.settings) {
            Ok(snapshot) => fetch_analysis(snapshot.conn(), limit),
            Err(err) => Outcome::from_acquire(err),
        }
    }

    /// Diagnostics for the current snapshot.
    pub fn diagnostics(&self) -> Diagnostics {
        diagnose(&self.resolver, self.settings)
    }
}
