//! Core types and trait definitions for docrest.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! defines what a resource must be able to do ([`resource::Resource`]) and
//! what a document collection must offer ([`collection::Collection`]); the
//! API and storage crates meet in the middle.

pub mod collection;
pub mod error;
pub mod id;
pub mod record;
pub mod resource;

pub use error::{DecodeError, Error, Result, ValidationError};
pub use id::ObjectId;
pub use record::Record;
