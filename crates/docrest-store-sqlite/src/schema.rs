//! SQL schema for the docrest SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `seq` gives every collection a stable iteration order (insertion order);
/// replacing a document keeps its `seq`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS documents (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    collection  TEXT NOT NULL,
    object_id   TEXT NOT NULL,   -- 24-char lowercase hex
    body        TEXT NOT NULL,   -- compact JSON
    UNIQUE (collection, object_id)
);
";
