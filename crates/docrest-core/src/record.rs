//! [`Record`] — one stored document as it comes out of a collection.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{DecodeError, Result, id::ObjectId};

/// A stored JSON document together with the id it is keyed by.
///
/// The id lives outside the document so backends can index it without
/// knowing which field a resource keeps it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
  id:       ObjectId,
  document: Value,
}

impl Record {
  pub fn new(id: ObjectId, document: Value) -> Self { Self { id, document } }

  /// Serialise `resource` into a record keyed by `id`.
  pub fn from_resource<T: Serialize>(id: ObjectId, resource: &T) -> Result<Self> {
    Ok(Self::new(id, serde_json::to_value(resource)?))
  }

  pub fn id(&self) -> ObjectId { self.id }

  pub fn document(&self) -> &Value { &self.document }

  /// Deserialise the document into `T`.
  pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
    Ok(T::deserialize(&self.document)?)
  }
}
