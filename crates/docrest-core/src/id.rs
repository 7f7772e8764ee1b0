//! Object identifiers.
//!
//! Resources are keyed by 12-byte BSON object ids. On the wire they travel
//! as 24-character lowercase hex strings; [`hex`] provides the serde glue for
//! that.

pub use bson::oid::ObjectId;

use crate::{Error, Result};

/// The all-zero id, used as the "unassigned" value of freshly built
/// resources.
pub const ZERO: ObjectId = ObjectId::from_bytes([0; 12]);

/// Parse a hex string into an [`ObjectId`].
pub fn parse(input: &str) -> Result<ObjectId> {
  ObjectId::parse_str(input).map_err(|source| Error::InvalidId {
    input: input.to_owned(),
    source,
  })
}

pub fn is_zero(id: &ObjectId) -> bool { *id == ZERO }

/// Serialise an [`ObjectId`] as a plain hex string.
///
/// ```rust,ignore
/// #[serde(rename = "ID", with = "docrest_core::id::hex")]
/// pub id: ObjectId,
/// ```
pub mod hex {
  use serde::{Deserialize, Deserializer, Serializer, de};

  use super::ObjectId;

  pub fn serialize<S: Serializer>(
    id: &ObjectId,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.to_hex())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<ObjectId, D::Error> {
    let raw = String::deserialize(deserializer)?;
    ObjectId::parse_str(&raw).map_err(de::Error::custom)
  }
}
