//! The example `Author`/`Book` domain.
//!
//! Field names on the wire are capitalised (`ID`, `Name`, `Books`, `Title`)
//! and `Books` is `null` when an author has none.

use docrest_core::{
  ObjectId, ValidationError, id,
  resource::{Resource, Validate, validate_all},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
  #[serde(rename = "ID", with = "id::hex")]
  pub id:    ObjectId,
  #[serde(rename = "Name")]
  pub name:  String,
  #[serde(rename = "Books")]
  pub books: Option<Vec<Book>>,
}

impl Default for Author {
  fn default() -> Self {
    Self {
      id:    id::ZERO,
      name:  String::new(),
      books: None,
    }
  }
}

impl Validate for Author {
  fn validate(&self) -> Result<(), ValidationError> {
    if id::is_zero(&self.id) {
      return Err(ValidationError::new("author needs an `ID`"));
    }
    if self.name.is_empty() {
      return Err(ValidationError::new("author needs a `Name`"));
    }
    validate_all(self.books.iter().flatten())
  }
}

impl Resource for Author {
  fn set_id(&mut self, id: ObjectId) { self.id = id; }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
  #[serde(rename = "Title")]
  pub title: String,
}

impl Validate for Book {
  fn validate(&self) -> Result<(), ValidationError> {
    if self.title.is_empty() {
      return Err(ValidationError::new("book needs a title"));
    }
    Ok(())
  }
}
