//! axum handlers delegating to a shared [`Controller`].
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/{name}`      | 200 + array |
//! | `POST`   | `/{name}`      | 201 + stored resource |
//! | `GET`    | `/{name}/{id}` | 200 + resource |
//! | `PUT`    | `/{name}/{id}` | 200 + replacement |
//! | `DELETE` | `/{name}/{id}` | 204, empty body |
//!
//! The `{id}` routes expect [`ValidId`] to have been attached by
//! [`crate::filter::valid_id`].

use std::sync::Arc;

use axum::{
  Extension, Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use docrest_core::{collection::Collection, resource::Resource};

use crate::{Controller, error::ApiError, filter::ValidId};

/// `GET /{name}`
pub async fn list<R, C>(
  State(controller): State<Arc<Controller<R, C>>>,
) -> Result<Json<Vec<R>>, ApiError>
where
  R: Resource,
  C: Collection,
{
  Ok(Json(controller.list().await?))
}

/// `GET /{name}/{id}`
pub async fn get_one<R, C>(
  State(controller): State<Arc<Controller<R, C>>>,
  Extension(ValidId(id)): Extension<ValidId>,
) -> Result<Json<R>, ApiError>
where
  R: Resource,
  C: Collection,
{
  Ok(Json(controller.get(id).await?))
}

/// `POST /{name}`
pub async fn create<R, C>(
  State(controller): State<Arc<Controller<R, C>>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  R: Resource,
  C: Collection,
{
  let resource = controller.create(&body).await?;
  Ok((StatusCode::CREATED, Json(resource)))
}

/// `PUT /{name}/{id}`
pub async fn update_one<R, C>(
  State(controller): State<Arc<Controller<R, C>>>,
  Extension(ValidId(id)): Extension<ValidId>,
  body: Bytes,
) -> Result<Json<R>, ApiError>
where
  R: Resource,
  C: Collection,
{
  Ok(Json(controller.update(id, &body).await?))
}

/// `DELETE /{name}/{id}`
pub async fn delete_one<R, C>(
  State(controller): State<Arc<Controller<R, C>>>,
  Extension(ValidId(id)): Extension<ValidId>,
) -> Result<StatusCode, ApiError>
where
  R: Resource,
  C: Collection,
{
  controller.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
