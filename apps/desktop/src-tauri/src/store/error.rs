//! Content-store error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The blob under `key` no longer parses as an entry array. Callers
    /// decide whether to surface this or fall back to an empty list.
    #[error("corrupt data under key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("japanese and thai text are required")]
    EmptyField,
}
