//! Error types for the query layer.

use radar_db::OpenError;

/// Errors that can occur while answering a read request.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The resolved snapshot could not be opened.
    #[error(transparent)]
    Open(#[from] OpenError),

    /// A query against an open snapshot failed.
    #[error("snapshot query error: {0}")]
    Database(#[from] rusqlite::Error),
}
