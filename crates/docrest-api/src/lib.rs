//! Generic JSON REST controller for docrest.
//!
//! Exposes an axum [`Router`] serving list/get/create/update/delete for one
//! resource type over any [`docrest_core::collection::Collection`]. Auth,
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let authors = Controller::<Author, _>::new(store.collection("author"));
//! let app = Router::new().merge(docrest_api::resource_router(Arc::new(authors)));
//! ```

pub mod controller;
pub mod error;
pub mod filter;
pub mod handlers;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use docrest_core::{collection::Collection, resource::Resource};

pub use controller::{Controller, DEFAULT_LIMIT, DEFAULT_TIMEOUT};
pub use error::{ApiError, ErrorBody, StorageError};
pub use filter::ValidId;

/// Build a fully-materialised router for `controller`.
///
/// Routes are mounted under `/{collection name}`; the `{id}` routes go
/// through [`filter::valid_id`] first.
pub fn resource_router<R, C>(controller: Arc<Controller<R, C>>) -> Router<()>
where
  R: Resource,
  C: Collection,
{
  let base = controller.collection().name().to_owned();
  resource_router_at(&base, controller)
}

/// Like [`resource_router`], but mounted under `base` instead of the
/// collection name. Surrounding slashes in `base` are ignored; an empty
/// `base` mounts at the root.
pub fn resource_router_at<R, C>(
  base: &str,
  controller: Arc<Controller<R, C>>,
) -> Router<()>
where
  R: Resource,
  C: Collection,
{
  let base = base.trim_matches('/');
  let (list, item) = if base.is_empty() {
    ("/".to_owned(), "/{id}".to_owned())
  } else {
    (format!("/{base}"), format!("/{base}/{{id}}"))
  };

  Router::new()
    .route(
      &list,
      get(handlers::list::<R, C>).post(handlers::create::<R, C>),
    )
    .route(
      &item,
      get(handlers::get_one::<R, C>)
        .put(handlers::update_one::<R, C>)
        .delete(handlers::delete_one::<R, C>)
        .route_layer(middleware::from_fn(filter::valid_id)),
    )
    .with_state(controller)
}

#[cfg(test)]
mod testing;
