//! Path id validation, run before the `{id}` handlers.

use axum::{
  extract::{Path, Request},
  middleware::Next,
  response::{IntoResponse, Response},
};
use docrest_core::{ObjectId, id};

use crate::error::ApiError;

/// An object id parsed from the request path, attached as a request
/// extension by [`valid_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidId(pub ObjectId);

/// Middleware: parse the `{id}` path parameter or answer 400
/// `{"error":"invalid bson ID"}` without calling the handler.
pub async fn valid_id(
  Path(raw): Path<String>,
  mut req: Request,
  next: Next,
) -> Response {
  match id::parse(&raw) {
    Ok(id) => {
      req.extensions_mut().insert(ValidId(id));
      next.run(req).await
    }
    Err(e) => {
      tracing::debug!(error = %e, "rejected path id");
      ApiError::InvalidId.into_response()
    }
  }
}
