//! [`SqliteStore`] and [`SqliteCollection`] — the SQLite implementation of
//! [`Collection`].

use std::{
  path::Path,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
};

use rusqlite::OptionalExtension as _;

use docrest_core::{ObjectId, Record, collection::Collection};

use crate::{
  Error, Result,
  cursor::SqliteCursor,
  encode::{RawRecord, encode_body, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A docrest document store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// A handle to the collection called `name`.
  ///
  /// Collections need no creation step; a name with no documents is simply
  /// an empty collection.
  pub fn collection(&self, name: impl Into<String>) -> SqliteCollection {
    SqliteCollection {
      conn:         self.conn.clone(),
      name:         name.into(),
      open_cursors: Arc::new(AtomicUsize::new(0)),
    }
  }
}

// ─── Collection ──────────────────────────────────────────────────────────────

/// One named collection inside a [`SqliteStore`].
///
/// Clones share the connection and the open-cursor counter.
#[derive(Clone)]
pub struct SqliteCollection {
  conn:         tokio_rusqlite::Connection,
  name:         String,
  open_cursors: Arc<AtomicUsize>,
}

impl SqliteCollection {
  /// Number of cursors handed out by this handle (or its clones) that have
  /// not been closed or dropped yet.
  pub fn open_cursors(&self) -> usize {
    self.open_cursors.load(Ordering::SeqCst)
  }

  /// Number of documents currently in the collection.
  pub async fn count(&self) -> Result<u64> {
    let name = self.name.clone();
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM documents WHERE collection = ?1",
          rusqlite::params![name],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(count as u64)
  }
}

impl Collection for SqliteCollection {
  type Cursor = SqliteCursor;
  type Error = Error;

  fn name(&self) -> &str { &self.name }

  async fn find(&self, limit: u64) -> Result<SqliteCursor> {
    SqliteCursor::open(
      self.conn.clone(),
      self.name.clone(),
      limit,
      self.open_cursors.clone(),
    )
    .await
  }

  async fn find_one(&self, id: ObjectId) -> Result<Record> {
    let name = self.name.clone();
    let id_str = encode_id(id);

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT seq, object_id, body FROM documents
               WHERE collection = ?1 AND object_id = ?2",
              rusqlite::params![name, id_str],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.ok_or(Error::NotFound)?.decode()?)
  }

  async fn insert_one(&self, record: Record) -> Result<()> {
    let name = self.name.clone();
    let id_str = encode_id(record.id());
    let body = encode_body(&record)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, object_id, body) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, id_str, body],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(collection = %self.name, id = %record.id(), "inserted document");
    Ok(())
  }

  async fn replace_one(&self, record: Record) -> Result<u64> {
    let name = self.name.clone();
    let id_str = encode_id(record.id());
    let body = encode_body(&record)?;

    let matched: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE documents SET body = ?3 WHERE collection = ?1 AND object_id = ?2",
          rusqlite::params![name, id_str, body],
        )?)
      })
      .await?;

    let matched = matched as u64;
    tracing::debug!(collection = %self.name, id = %record.id(), matched, "replaced document");
    Ok(matched)
  }

  async fn delete_one(&self, id: ObjectId) -> Result<u64> {
    let name = self.name.clone();
    let id_str = encode_id(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM documents WHERE collection = ?1 AND object_id = ?2",
          rusqlite::params![name, id_str],
        )?)
      })
      .await?;

    let deleted = deleted as u64;
    tracing::debug!(collection = %self.name, %id, deleted, "deleted document");
    Ok(deleted)
  }
}
