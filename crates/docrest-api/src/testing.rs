//! Fixtures shared by the controller and router tests.

use std::time::Duration;

use docrest_core::{
  ObjectId, Record, ValidationError,
  collection::Collection,
  id,
  resource::{Resource, Validate, validate_all},
};
use docrest_store_sqlite::{Error, SqliteCollection, SqliteCursor};
use serde::{Deserialize, Serialize};

// ─── Resource ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Widget {
  #[serde(with = "id::hex")]
  pub id:    ObjectId,
  pub name:  String,
  pub parts: Option<Vec<Part>>,
}

impl Widget {
  pub fn named(name: &str) -> Self {
    Self {
      id:    ObjectId::new(),
      name:  name.to_owned(),
      parts: None,
    }
  }

  pub fn record(&self) -> Record { Record::from_resource(self.id, self).unwrap() }
}

impl Default for Widget {
  fn default() -> Self {
    Self {
      id:    id::ZERO,
      name:  String::new(),
      parts: None,
    }
  }
}

impl Validate for Widget {
  fn validate(&self) -> Result<(), ValidationError> {
    if id::is_zero(&self.id) {
      return Err(ValidationError::new("widget needs an id"));
    }
    if self.name.is_empty() {
      return Err(ValidationError::new("widget needs a name"));
    }
    validate_all(self.parts.iter().flatten())
  }
}

impl Resource for Widget {
  fn set_id(&mut self, id: ObjectId) { self.id = id; }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Part {
  pub label: String,
}

impl Validate for Part {
  fn validate(&self) -> Result<(), ValidationError> {
    if self.label.is_empty() {
      return Err(ValidationError::new("part needs a label"));
    }
    Ok(())
  }
}

// ─── Misbehaving collection ──────────────────────────────────────────────────

#[derive(Clone, Copy)]
pub enum Mode {
  /// Every call hangs far past any test deadline.
  Stall,
  /// Every call fails as if the connection were gone.
  Fail,
}

/// A [`SqliteCollection`] whose calls stall or fail before reaching storage.
#[derive(Clone)]
pub struct Flaky {
  pub inner: SqliteCollection,
  pub mode:  Mode,
}

impl Flaky {
  async fn hiccup(&self) -> Result<(), Error> {
    match self.mode {
      Mode::Stall => {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
      }
      Mode::Fail => Err(Error::Database(
        tokio_rusqlite::Error::ConnectionClosed,
      )),
    }
  }
}

impl Collection for Flaky {
  type Cursor = SqliteCursor;
  type Error = Error;

  fn name(&self) -> &str { self.inner.name() }

  async fn find(&self, limit: u64) -> Result<SqliteCursor, Error> {
    self.hiccup().await?;
    self.inner.find(limit).await
  }

  async fn find_one(&self, id: ObjectId) -> Result<Record, Error> {
    self.hiccup().await?;
    self.inner.find_one(id).await
  }

  async fn insert_one(&self, record: Record) -> Result<(), Error> {
    self.hiccup().await?;
    self.inner.insert_one(record).await
  }

  async fn replace_one(&self, record: Record) -> Result<u64, Error> {
    self.hiccup().await?;
    self.inner.replace_one(record).await
  }

  async fn delete_one(&self, id: ObjectId) -> Result<u64, Error> {
    self.hiccup().await?;
    self.inner.delete_one(id).await
  }
}
