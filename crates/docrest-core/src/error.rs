//! Error types for `docrest-core`.

use thiserror::Error;

/// A resource failed its own validation predicate.
///
/// The message is shown to API callers verbatim, so it should name the
/// offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
  pub fn new(message: impl Into<String>) -> Self { Self(message.into()) }

  pub fn message(&self) -> &str { &self.0 }
}

/// A stored document or request body did not have the shape a resource
/// expects.
#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("{0}")]
  Json(#[from] serde_json::Error),

  #[error("{0}")]
  Shape(String),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid object id {input:?}: {source}")]
  InvalidId {
    input:  String,
    #[source]
    source: bson::oid::Error,
  },

  #[error("encode error: {0}")]
  Encode(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
