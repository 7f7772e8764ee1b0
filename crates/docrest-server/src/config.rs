//! Runtime server configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration, read from an optional TOML file and overridden by
/// `DOCREST_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  /// Collection the authors live in.
  pub collection:           String,
  /// URL prefix the authors are served under.
  pub mount:                String,
  pub request_timeout_secs: u64,
  pub list_limit:           u64,
  /// Insert a sample author on startup.
  pub seed:                 bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "127.0.0.1".into(),
      port:                 9889,
      store_path:           PathBuf::from("docrest.sqlite3"),
      collection:           "author".into(),
      mount:                "/authors".into(),
      request_timeout_secs: docrest_api::DEFAULT_TIMEOUT.as_secs(),
      list_limit:           docrest_api::DEFAULT_LIMIT,
      seed:                 false,
    }
  }
}

impl ServerConfig {
  /// Layer `path` (if it exists) and the environment over the defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("DOCREST"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
