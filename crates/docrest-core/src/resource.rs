//! The resource contract.
//!
//! A resource is any domain value the generic controller can serve. The
//! controller never looks inside one; it only assigns ids, asks for
//! validation, and decodes stored records through this trait.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{DecodeError, Record, ValidationError, id::ObjectId};

/// Self-validation. Also implemented by the sub-structures a resource
/// embeds, so a resource can validate them in order with [`validate_all`].
pub trait Validate {
  /// Returns the first failure found. Must not perform I/O.
  fn validate(&self) -> Result<(), ValidationError>;
}

/// A type the generic controller can list, get, create, update and delete.
pub trait Resource:
  Validate + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Set the identity field. Touches nothing else.
  fn set_id(&mut self, id: ObjectId);

  /// Populate `self` from one stored record.
  ///
  /// The default replaces `self` with the record's document deserialised
  /// as `Self`.
  fn decode_from(&mut self, record: &Record) -> Result<(), DecodeError> {
    *self = record.deserialize()?;
    Ok(())
  }

  /// Apply a JSON request body to `self`.
  ///
  /// The default overlays the body's fields onto `self`, so fields the body
  /// leaves out keep the values `self` started with. Nested objects are
  /// overlaid the same way; arrays and scalars are replaced. The body must
  /// be a JSON object.
  fn bind(&mut self, body: &[u8]) -> Result<(), DecodeError> {
    let patch: Value = serde_json::from_slice(body)?;
    if !patch.is_object() {
      return Err(DecodeError::Shape(format!(
        "expected a JSON object, found {}",
        kind(&patch)
      )));
    }
    let mut merged = serde_json::to_value(&*self)?;
    overlay(&mut merged, patch);
    *self = serde_json::from_value(merged)?;
    Ok(())
  }
}

fn overlay(base: &mut Value, patch: Value) {
  match (base, patch) {
    (Value::Object(base), Value::Object(patch)) => {
      for (key, value) in patch {
        match base.get_mut(&key) {
          Some(slot) => overlay(slot, value),
          None => {
            base.insert(key, value);
          }
        }
      }
    }
    (slot, value) => *slot = value,
  }
}

fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// Validate every item in iteration order, stopping at the first failure.
pub fn validate_all<'a, V, I>(items: I) -> Result<(), ValidationError>
where
  V: Validate + 'a,
  I: IntoIterator<Item = &'a V>,
{
  items.into_iter().try_for_each(Validate::validate)
}

#[cfg(test)]
mod tests {
  use serde::{Deserialize, Serialize};
  use serde_json::json;

  use super::*;
  use crate::id;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  #[serde(default)]
  struct Tag {
    label: String,
  }

  impl Validate for Tag {
    fn validate(&self) -> Result<(), ValidationError> {
      if self.label.is_empty() {
        return Err(ValidationError::new("tag needs a label"));
      }
      Ok(())
    }
  }

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  #[serde(default)]
  struct Note {
    #[serde(with = "id::hex")]
    id:   ObjectId,
    text: String,
    tags: Vec<Tag>,
  }

  impl Default for Note {
    fn default() -> Self {
      Self {
        id:   id::ZERO,
        text: String::new(),
        tags: Vec::new(),
      }
    }
  }

  impl Validate for Note {
    fn validate(&self) -> Result<(), ValidationError> {
      if self.text.is_empty() {
        return Err(ValidationError::new("note needs text"));
      }
      validate_all(&self.tags)
    }
  }

  impl Resource for Note {
    fn set_id(&mut self, id: ObjectId) { self.id = id; }
  }

  #[test]
  fn set_id_only_touches_identity() {
    let mut note = Note {
      text: "hello".into(),
      ..Note::default()
    };
    let id = ObjectId::new();
    note.set_id(id);
    note.set_id(id);
    assert_eq!(note.id, id);
    assert_eq!(note.text, "hello");
  }

  #[test]
  fn validate_all_reports_first_failure_in_order() {
    let tags = vec![
      Tag { label: "ok".into() },
      Tag { label: String::new() },
      Tag { label: String::new() },
    ];
    let err = validate_all(&tags).unwrap_err();
    assert_eq!(err.message(), "tag needs a label");

    assert!(validate_all(&Vec::<Tag>::new()).is_ok());
  }

  #[test]
  fn nested_failure_surfaces_through_parent() {
    let note = Note {
      text: "hi".into(),
      tags: vec![Tag::default()],
      ..Note::default()
    };
    assert_eq!(note.validate().unwrap_err().to_string(), "tag needs a label");
  }

  #[test]
  fn default_decode_reads_record_document() {
    let id = ObjectId::new();
    let record = Record::new(
      id,
      json!({ "id": id.to_hex(), "text": "stored", "tags": [{ "label": "a" }] }),
    );

    let mut note = Note::default();
    note.decode_from(&record).unwrap();
    assert_eq!(note.id, id);
    assert_eq!(note.text, "stored");
    assert_eq!(note.tags, vec![Tag { label: "a".into() }]);
  }

  #[test]
  fn decode_rejects_mismatched_shape() {
    let record = Record::new(ObjectId::new(), json!({ "text": 17 }));
    let mut note = Note::default();
    assert!(matches!(note.decode_from(&record), Err(DecodeError::Json(_))));
  }

  /// No `#[serde(default)]`: every field must be present when deserialised
  /// on its own.
  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Strict {
    #[serde(with = "id::hex")]
    id:    ObjectId,
    title: String,
    meta:  Meta,
  }

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Meta {
    lang:  String,
    pages: u32,
  }

  impl Validate for Strict {
    fn validate(&self) -> Result<(), ValidationError> { Ok(()) }
  }

  impl Resource for Strict {
    fn set_id(&mut self, id: ObjectId) { self.id = id; }
  }

  fn strict() -> Strict {
    Strict {
      id:    id::ZERO,
      title: "untitled".into(),
      meta:  Meta {
        lang:  "en".into(),
        pages: 0,
      },
    }
  }

  #[test]
  fn bind_keeps_fields_the_body_leaves_out() {
    let mut doc = strict();
    doc.bind(br#"{"meta":{"pages":12}}"#).unwrap();
    assert_eq!(doc.title, "untitled");
    assert_eq!(doc.meta.lang, "en");
    assert_eq!(doc.meta.pages, 12);

    let mut empty = strict();
    empty.bind(b"{}").unwrap();
    assert_eq!(empty, strict());
  }

  #[test]
  fn bind_replaces_arrays_and_ignores_unknown_fields() {
    let mut note = Note {
      text: "old".into(),
      tags: vec![Tag { label: "a".into() }, Tag { label: "b".into() }],
      ..Note::default()
    };
    note
      .bind(br#"{"tags":[{"label":"c"}],"extra":true}"#)
      .unwrap();
    assert_eq!(note.text, "old");
    assert_eq!(note.tags, vec![Tag { label: "c".into() }]);
  }

  #[test]
  fn bind_rejects_bad_bodies() {
    let mut doc = strict();
    assert!(matches!(doc.bind(b"{"), Err(DecodeError::Json(_))));
    assert!(matches!(
      doc.bind(br#"{"meta":{"pages":"many"}}"#),
      Err(DecodeError::Json(_))
    ));

    let err = doc.bind(br#""text""#).unwrap_err();
    assert!(matches!(err, DecodeError::Shape(_)));
    assert_eq!(err.to_string(), "expected a JSON object, found a string");

    assert_eq!(doc, strict());
  }

  #[test]
  fn record_from_resource_keeps_id_outside_document() {
    let id = ObjectId::new();
    let note = Note {
      id,
      text: "x".into(),
      tags: Vec::new(),
    };
    let record = Record::from_resource(id, &note).unwrap();
    assert_eq!(record.id(), id);
    assert_eq!(record.document()["text"], "x");
  }
}
