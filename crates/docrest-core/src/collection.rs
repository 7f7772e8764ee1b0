//! The `Collection` and `Cursor` traits.
//!
//! A collection is one named grouping of JSON documents keyed by
//! [`ObjectId`]. Backends (e.g. `docrest-store-sqlite`) implement these
//! traits; the controller in `docrest-api` depends only on them.
//!
//! Deadlines are applied by the caller around each returned future, so
//! backends need not thread a timeout through every call.

use std::future::Future;

use thiserror::Error;

use crate::{DecodeError, Record, id::ObjectId};

/// Why [`Cursor::next`] produced no record.
#[derive(Debug, Error)]
pub enum CursorError<E> {
  /// The backend failed. The cursor should not be advanced further.
  #[error(transparent)]
  Storage(E),

  /// The backend read a stored document but could not turn it into a
  /// [`Record`]. Iteration may continue past it.
  #[error(transparent)]
  Decode(DecodeError),
}

/// A server-side iteration over the result of [`Collection::find`].
///
/// Cursors hold backend resources until [`Cursor::close`] is called.
/// Implementations should also release on drop, but callers are expected
/// to close explicitly on every exit path.
pub trait Cursor: Send {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The next record, or `None` once the result set is exhausted.
  fn next(
    &mut self,
  ) -> impl Future<Output = Result<Option<Record>, CursorError<Self::Error>>>
  + Send
  + '_;

  /// Release the cursor.
  fn close(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Abstraction over a single document collection.
///
/// All methods return `Send` futures so a collection can sit behind an
/// `Arc` in a multi-threaded axum server.
pub trait Collection: Send + Sync + 'static {
  type Error: std::error::Error + Send + Sync + 'static;
  type Cursor: Cursor<Error = Self::Error>;

  /// The collection's name; also the path segment it is served under.
  fn name(&self) -> &str;

  /// Unfiltered find over at most `limit` records, in storage iteration
  /// order. A `limit` of `0` means no cap.
  fn find(
    &self,
    limit: u64,
  ) -> impl Future<Output = Result<Self::Cursor, Self::Error>> + Send + '_;

  /// Fetch the record keyed by `id`. A missing record is an error.
  fn find_one(
    &self,
    id: ObjectId,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + '_;

  /// Insert a new record. Fails if its id is already taken.
  fn insert_one(
    &self,
    record: Record,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace the whole document keyed by `record.id()`. Returns the number
  /// of records matched (`0` or `1`).
  fn replace_one(
    &self,
    record: Record,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Delete the record keyed by `id`. Returns the number deleted (`0` or
  /// `1`).
  fn delete_one(
    &self,
    id: ObjectId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
