//! API error type and [`axum::response::IntoResponse`] implementation.

use std::time::Duration;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use docrest_core::{DecodeError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The JSON body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
}

/// A failed call against the bound collection.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("storage deadline of {0:?} exceeded")]
  DeadlineExceeded(Duration),

  #[error("{0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
  pub fn backend(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Backend(Box::new(e))
  }
}

/// An error returned by a controller operation.
///
/// Each variant carries its own status code; which variant a storage
/// failure becomes depends on the operation (see [`crate::Controller`]).
#[derive(Debug, Error)]
pub enum ApiError {
  /// The path id is not a valid object id.
  #[error("invalid bson ID")]
  InvalidId,

  /// The request body could not be parsed into the resource type.
  #[error("{0}")]
  Unprocessable(String),

  #[error("invalid resource: {0}")]
  Invalid(#[from] ValidationError),

  #[error("{0}")]
  NotFound(String),

  /// A listed record did not decode into the resource type.
  #[error("Decoding {0}")]
  Decoding(#[source] DecodeError),

  #[error("{0}")]
  Store(#[from] StorageError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidId | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Decoding(_) | ApiError::Store(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  pub fn body(&self) -> ErrorBody {
    ErrorBody {
      error: self.to_string(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status(), Json(self.body())).into_response()
  }
}
