//! Example docrest server: an `Author` resource served from SQLite.

pub mod author;
pub mod config;

use std::{sync::Arc, time::Duration};

use axum::Router;
use docrest_api::Controller;
use docrest_core::{ObjectId, Record, collection::Collection};
use docrest_store_sqlite::{SqliteCollection, SqliteStore};
use tower_http::trace::TraceLayer;

use crate::{
  author::{Author, Book},
  config::ServerConfig,
};

/// Build the application router for `store` as configured by `config`.
pub fn app(config: &ServerConfig, store: &SqliteStore) -> Router {
  let controller =
    Controller::<Author, _>::new(store.collection(config.collection.as_str()))
      .with_timeout(Duration::from_secs(config.request_timeout_secs))
      .with_limit(config.list_limit);

  docrest_api::resource_router_at(&config.mount, Arc::new(controller))
    .layer(TraceLayer::new_for_http())
}

/// Insert the sample author "Bob" with two books.
pub async fn seed(
  collection: &SqliteCollection,
) -> docrest_store_sqlite::Result<Author> {
  let author = Author {
    id:    ObjectId::new(),
    name:  "Bob".into(),
    books: Some(vec![
      Book {
        title: "MyBook".into(),
      },
      Book {
        title: "MyBook2".into(),
      },
    ]),
  };
  collection
    .insert_one(Record::from_resource(author.id, &author)?)
    .await?;
  tracing::info!(collection = collection.name(), id = %author.id, "seeded sample author");
  Ok(author)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use serde_json::Value;
  use tower::ServiceExt as _;

  use super::*;

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory()
      .await
      .expect("in-memory store")
  }

  async fn call(
    router: Router,
    method: &str,
    uri: &str,
    body: &str,
  ) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .body(Body::from(body.to_string()))
      .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, bytes.to_vec())
  }

  #[tokio::test]
  async fn empty_store_lists_empty_array() {
    let s = store().await;
    let cfg = ServerConfig::default();
    let (status, body) = call(app(&cfg, &s), "GET", "/authors", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");

    // The mount is independent of the collection name.
    let (status, body) = call(app(&cfg, &s), "GET", "/author", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
  }

  #[tokio::test]
  async fn authors_end_to_end() {
    let s = store().await;
    let cfg = ServerConfig {
      collection: "authors".into(),
      ..ServerConfig::default()
    };
    let c = s.collection("authors");

    let alice = Author {
      id:    ObjectId::new(),
      name:  "Alice".into(),
      books: None,
    };
    let bob = Author {
      id:    ObjectId::new(),
      name:  "Bob".into(),
      books: None,
    };
    for a in [&alice, &bob] {
      c.insert_one(Record::from_resource(a.id, a).unwrap())
        .await
        .unwrap();
    }

    let (status, body) = call(app(&cfg, &s), "GET", "/authors", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::to_vec(&[&alice, &bob]).unwrap());

    let (status, body) =
      call(app(&cfg, &s), "POST", "/authors", r#"{"Name":"Test"}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Author = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.name, "Test");
    assert!(!docrest_core::id::is_zero(&created.id));
    assert_eq!(created.books, None);

    let (_, body) = call(app(&cfg, &s), "GET", "/authors", "").await;
    let listed: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(listed.len(), 3);

    let alice_uri = format!("/authors/{}", alice.id.to_hex());
    let (status, body) = call(app(&cfg, &s), "GET", &alice_uri, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::to_vec(&alice).unwrap());

    let (status, body) =
      call(app(&cfg, &s), "PUT", &alice_uri, r#"{"Name":"Bob"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let renamed = Author {
      name: "Bob".into(),
      ..alice.clone()
    };
    assert_eq!(body, serde_json::to_vec(&renamed).unwrap());

    let (status, body) = call(app(&cfg, &s), "DELETE", &alice_uri, "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(c.count().await.unwrap(), 2);

    let (status, body) = call(app(&cfg, &s), "GET", "/authors/nope", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, br#"{"error":"invalid bson ID"}"#);
  }

  #[tokio::test]
  async fn create_author_without_name_is_rejected() {
    let s = store().await;
    let cfg = ServerConfig::default();
    let (status, body) = call(app(&cfg, &s), "POST", "/authors", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, br#"{"error":"invalid resource: author needs a `Name`"}"#);

    let (status, body) = call(
      app(&cfg, &s),
      "POST",
      "/authors",
      r#"{"Name":"Bob","Books":[{"Title":""}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, br#"{"error":"invalid resource: book needs a title"}"#);
    assert_eq!(s.collection("author").count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn seed_inserts_bob_with_books() {
    let s = store().await;
    let c = s.collection("author");
    let seeded = seed(&c).await.unwrap();

    let (status, body) = call(app(&ServerConfig::default(), &s), "GET", "/authors", "").await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Author> = serde_json::from_slice(&body).unwrap();
    assert_eq!(listed, vec![seeded]);
    assert_eq!(listed[0].books.as_ref().map(Vec::len), Some(2));
  }
}
