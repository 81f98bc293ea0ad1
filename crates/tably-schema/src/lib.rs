//! Schema cache for tably.
//!
//! Pins the column types of each tracked path the first time it is ingested,
//! so later ingests of the same path parse under the same schema even if the
//! new contents would infer differently. The cache lives in `schemas.json`
//! and is only invalidated by an explicit [`SchemaCache::remove`].

pub mod cache;
pub mod error;

pub use cache::SchemaCache;
pub use error::{SchemaError, SchemaResult};
