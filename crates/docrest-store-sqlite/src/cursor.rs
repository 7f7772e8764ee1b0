//! [`SqliteCursor`] — batched iteration over one collection.
//!
//! SQLite statements cannot outlive a single `tokio_rusqlite` call, so the
//! cursor pages through the collection by `seq` instead of holding a live
//! statement. The first batch is fetched eagerly so connectivity errors
//! surface from `find` itself.

use std::{
  collections::VecDeque,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
};

use docrest_core::{
  DecodeError, Record,
  collection::{Cursor, CursorError},
};

use crate::{Error, Result, encode::RawRecord};

const BATCH_SIZE: u64 = 101;

pub struct SqliteCursor {
  conn:         tokio_rusqlite::Connection,
  collection:   String,
  /// Records still allowed by the caller's limit; `None` means uncapped.
  remaining:    Option<u64>,
  last_seq:     i64,
  /// Rows fetched but not yet handed out, each already parsed.
  buffer:       VecDeque<Result<Record, DecodeError>>,
  exhausted:    bool,
  released:     bool,
  open_cursors: Arc<AtomicUsize>,
}

impl SqliteCursor {
  pub(crate) async fn open(
    conn: tokio_rusqlite::Connection,
    collection: String,
    limit: u64,
    open_cursors: Arc<AtomicUsize>,
  ) -> Result<Self> {
    open_cursors.fetch_add(1, Ordering::SeqCst);
    let mut cursor = Self {
      conn,
      collection,
      remaining: (limit > 0).then_some(limit),
      last_seq: 0,
      buffer: VecDeque::new(),
      exhausted: false,
      released: false,
      open_cursors,
    };
    // On error the cursor is dropped here, which releases it.
    cursor.fetch_batch().await?;
    Ok(cursor)
  }

  async fn fetch_batch(&mut self) -> Result<()> {
    let want = match self.remaining {
      Some(0) => {
        self.exhausted = true;
        return Ok(());
      }
      Some(n) => n.min(BATCH_SIZE),
      None => BATCH_SIZE,
    };
    let name = self.collection.clone();
    let after = self.last_seq;

    let rows: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT seq, object_id, body FROM documents
           WHERE collection = ?1 AND seq > ?2
           ORDER BY seq
           LIMIT ?3",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![name, after, want as i64],
            RawRecord::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let fetched = rows.len() as u64;
    if fetched < want {
      self.exhausted = true;
    }
    if let Some(n) = self.remaining.as_mut() {
      *n -= fetched;
    }
    for raw in rows {
      self.last_seq = raw.seq;
      self.buffer.push_back(raw.decode());
    }
    Ok(())
  }

  fn release(&mut self) {
    if !self.released {
      self.released = true;
      self.buffer.clear();
      self.open_cursors.fetch_sub(1, Ordering::SeqCst);
    }
  }
}

impl Cursor for SqliteCursor {
  type Error = Error;

  async fn next(&mut self) -> Result<Option<Record>, CursorError<Error>> {
    if self.buffer.is_empty() && !self.exhausted && !self.released {
      self.fetch_batch().await.map_err(CursorError::Storage)?;
    }
    self.buffer.pop_front().transpose().map_err(CursorError::Decode)
  }

  async fn close(mut self) -> Result<()> {
    self.release();
    Ok(())
  }
}

impl Drop for SqliteCursor {
  fn drop(&mut self) { self.release(); }
}
