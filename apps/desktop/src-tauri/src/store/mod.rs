//! Persistent key-value store for user-added entries.

pub mod error;
pub mod repository;
pub mod schema;

pub use error::StoreError;
pub use repository::{ContentRepository, SqliteStore};
