//! Error type for `docrest-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error(transparent)]
  Core(#[from] docrest_core::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("stored document could not be read: {0}")]
  Decode(#[from] docrest_core::DecodeError),

  #[error("object id parse error: {0}")]
  ObjectId(#[from] bson::oid::Error),

  /// A lookup by id matched nothing.
  #[error("no documents in result")]
  NotFound,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
