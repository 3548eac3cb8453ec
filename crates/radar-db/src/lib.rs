//! Snapshot access layer for the radar API.
//!
//! Resolves which snapshot file in the configured directory is current and
//! opens it read-only. Snapshots are produced by an external crawler on its
//! own schedule; this crate never writes to them.
//!
//! # Design decisions
//!
//! - **Re-resolve per request**: [`SnapshotResolver::resolve`] lists the
//!   directory on every call, so a freshly rotated snapshot is served as soon
//!   as it lands.
//! - **No pool**: each caller opens a private read-only connection with
//!   [`acquire`] and drops it when its single query is done.
//! - **Schema drift is expected**: [`catalog`] helpers let callers check for
//!   tables before querying them.

pub mod catalog;
mod connection;
mod resolver;

pub use catalog::ColumnInfo;
pub use connection::{
    acquire, open_snapshot, AcquireError, DbRuntimeSettings, OpenError, SnapshotConnection,
};
pub use resolver::{SnapshotResolver, DEFAULT_EXTENSION};
