//! Conversions between [`Record`]s and the plain-text columns stored in
//! SQLite. Ids are stored as lowercase hex, documents as compact JSON.

use docrest_core::{DecodeError, ObjectId, Record};

use crate::Result;

/// A `documents` row as read from SQLite, before any parsing.
pub struct RawRecord {
  pub seq:       i64,
  pub object_id: String,
  pub body:      String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      seq:       row.get(0)?,
      object_id: row.get(1)?,
      body:      row.get(2)?,
    })
  }

  /// Parse the id and body columns. A row that fails here was written by
  /// something other than this crate.
  pub fn decode(self) -> Result<Record, DecodeError> {
    let id = decode_id(&self.object_id).map_err(|e| {
      DecodeError::Shape(format!("stored id {:?}: {e}", self.object_id))
    })?;
    Ok(Record::new(id, serde_json::from_str(&self.body)?))
  }
}

pub fn encode_id(id: ObjectId) -> String { id.to_hex() }

pub fn decode_id(s: &str) -> Result<ObjectId> { Ok(ObjectId::parse_str(s)?) }

pub fn encode_body(record: &Record) -> Result<String> {
  Ok(serde_json::to_string(record.document())?)
}
