//! [`Controller`] — generic list/get/create/update/delete over one
//! collection.
//!
//! | Operation | Success | Storage failure | Other failures |
//! |-----------|---------|-----------------|----------------|
//! | list      | 200     | 500             | 500 on a record that fails to decode |
//! | get       | 200     | 404             | |
//! | create    | 201     | 500             | 422 bad body, 400 invalid resource |
//! | update    | 200     | 404             | 422 bad body, 400 invalid resource, 404 no match |
//! | delete    | 204     | 404             | 404 no match |
//!
//! Storage failures on single-record operations are reported as 404, not
//! 500. API consumers depend on that, so keep it.

use std::{future::Future, sync::Arc, time::Duration};

use docrest_core::{
  ObjectId, Record,
  collection::{Collection, Cursor, CursorError},
  resource::Resource,
};
use tokio::time::Instant;

use crate::error::{ApiError, StorageError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_LIMIT: u64 = 1000;

type Factory<R> = Arc<dyn Fn() -> R + Send + Sync>;

/// A CRUD controller bound to one collection of `R`.
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct Controller<R, C> {
  collection: C,
  new:        Factory<R>,
  timeout:    Duration,
  limit:      u64,
}

impl<R, C> Controller<R, C>
where
  R: Resource,
  C: Collection,
{
  /// A controller that builds empty resources with `R::default()`.
  pub fn new(collection: C) -> Self
  where
    R: Default,
  {
    Self::with_factory(collection, R::default)
  }

  /// A controller that builds empty resources with `factory`.
  pub fn with_factory(
    collection: C,
    factory: impl Fn() -> R + Send + Sync + 'static,
  ) -> Self {
    Self {
      collection,
      new: Arc::new(factory),
      timeout: DEFAULT_TIMEOUT,
      limit: DEFAULT_LIMIT,
    }
  }

  /// Deadline applied to the storage calls of each request.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Maximum number of records returned by [`Controller::list`]. `0` lifts
  /// the cap.
  pub fn with_limit(mut self, limit: u64) -> Self {
    self.limit = limit;
    self
  }

  pub fn collection(&self) -> &C { &self.collection }

  pub fn timeout(&self) -> Duration { self.timeout }

  pub fn limit(&self) -> u64 { self.limit }

  // ─── Operations ─────────────────────────────────────────────────────────

  /// Every record in the collection, up to the limit, in storage order.
  ///
  /// All-or-nothing: one record that fails to decode fails the whole call.
  pub async fn list(&self) -> Result<Vec<R>, ApiError> {
    let deadline = self.deadline();
    let mut cursor = self.bounded(deadline, self.collection.find(self.limit)).await?;

    let result = self.drain(&mut cursor, deadline).await;

    if let Err(e) = cursor.close().await {
      tracing::warn!(collection = self.collection.name(), error = %e, "failed to close cursor");
    }
    result
  }

  async fn drain(
    &self,
    cursor: &mut C::Cursor,
    deadline: Option<Instant>,
  ) -> Result<Vec<R>, ApiError> {
    let mut resources = Vec::new();
    loop {
      let record = match self.within(deadline, cursor.next()).await? {
        Ok(Some(record)) => record,
        Ok(None) => break,
        Err(CursorError::Storage(e)) => return Err(StorageError::backend(e).into()),
        Err(CursorError::Decode(e)) => {
          tracing::error!(
            collection = self.collection.name(),
            error = %e,
            "failed to read stored document"
          );
          return Err(ApiError::Decoding(e));
        }
      };

      let mut resource = (self.new)();
      if let Err(e) = resource.decode_from(&record) {
        tracing::error!(
          collection = self.collection.name(),
          id = %record.id(),
          error = %e,
          "failed to decode record"
        );
        return Err(ApiError::Decoding(e));
      }
      resources.push(resource);
    }
    Ok(resources)
  }

  /// The record keyed by `id`.
  pub async fn get(&self, id: ObjectId) -> Result<R, ApiError> {
    let deadline = self.deadline();
    let record = self
      .bounded(deadline, self.collection.find_one(id))
      .await
      .map_err(not_found)?;

    let mut resource = (self.new)();
    resource
      .decode_from(&record)
      .map_err(|e| ApiError::NotFound(e.to_string()))?;
    Ok(resource)
  }

  /// Parse `body`, give it a fresh id, validate it and insert it.
  ///
  /// Any id in the body is ignored.
  pub async fn create(&self, body: &[u8]) -> Result<R, ApiError> {
    let deadline = self.deadline();
    let mut resource = self.bind(body)?;

    let id = ObjectId::new();
    resource.set_id(id);
    resource.validate()?;

    let record =
      Record::from_resource(id, &resource).map_err(StorageError::backend)?;
    self
      .bounded(deadline, self.collection.insert_one(record))
      .await?;

    tracing::debug!(collection = self.collection.name(), %id, "created resource");
    Ok(resource)
  }

  /// Parse `body`, key it by `id`, validate it and replace the stored
  /// document.
  ///
  /// `id` always wins over any id in the body.
  pub async fn update(&self, id: ObjectId, body: &[u8]) -> Result<R, ApiError> {
    let deadline = self.deadline();
    let mut resource = self.bind(body)?;

    resource.set_id(id);
    resource.validate()?;

    let record = Record::from_resource(id, &resource)
      .map_err(|e| ApiError::NotFound(e.to_string()))?;
    let matched = self
      .bounded(deadline, self.collection.replace_one(record))
      .await
      .map_err(not_found)?;
    if matched == 0 {
      return Err(ApiError::NotFound("not found".into()));
    }

    tracing::debug!(collection = self.collection.name(), %id, "updated resource");
    Ok(resource)
  }

  /// Delete the record keyed by `id`.
  pub async fn delete(&self, id: ObjectId) -> Result<(), ApiError> {
    let deadline = self.deadline();
    let deleted = self
      .bounded(deadline, self.collection.delete_one(id))
      .await
      .map_err(not_found)?;
    if deleted == 0 {
      return Err(ApiError::NotFound("not found".into()));
    }

    tracing::debug!(collection = self.collection.name(), %id, "deleted resource");
    Ok(())
  }

  // ─── Helpers ────────────────────────────────────────────────────────────

  /// `None` when the timeout is too large to express as an instant; such
  /// requests run unbounded.
  fn deadline(&self) -> Option<Instant> {
    Instant::now().checked_add(self.timeout)
  }

  /// A factory-built resource with `body` applied to it.
  fn bind(&self, body: &[u8]) -> Result<R, ApiError> {
    let mut resource = (self.new)();
    resource
      .bind(body)
      .map_err(|e| ApiError::Unprocessable(e.to_string()))?;
    Ok(resource)
  }

  /// Run one storage call, failing it once `deadline` has passed.
  async fn bounded<T, E>(
    &self,
    deadline: Option<Instant>,
    call: impl Future<Output = Result<T, E>>,
  ) -> Result<T, StorageError>
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    self
      .within(deadline, call)
      .await?
      .map_err(StorageError::backend)
  }

  async fn within<T>(
    &self,
    deadline: Option<Instant>,
    call: impl Future<Output = T>,
  ) -> Result<T, StorageError> {
    let Some(deadline) = deadline else {
      return Ok(call.await);
    };
    match tokio::time::timeout_at(deadline, call).await {
      Ok(result) => Ok(result),
      Err(_) => {
        tracing::warn!(
          collection = self.collection.name(),
          timeout = ?self.timeout,
          "storage call exceeded deadline"
        );
        Err(StorageError::DeadlineExceeded(self.timeout))
      }
    }
  }
}

fn not_found(e: StorageError) -> ApiError { ApiError::NotFound(e.to_string()) }
