//! SQLite backend for docrest collections.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every collection lives in one
//! `documents` table, namespaced by collection name.

mod cursor;
mod encode;
mod schema;
mod store;

pub mod error;

pub use cursor::SqliteCursor;
pub use error::{Error, Result};
pub use store::{SqliteCollection, SqliteStore};
