//! Foundation types for tably.
//!
//! Every other tably crate depends on `tably-types`. It provides the
//! content hash used to address stored objects and the namespaces those
//! objects live in.
//!
//! # Key Types
//!
//! - [`ObjectId`]: Content-addressed identifier (SHA-256 hash)
//! - [`Namespace`]: Disjoint object namespaces: chunk, recipe, manifest

pub mod error;
pub mod namespace;
pub mod object;

pub use error::TypeError;
pub use namespace::Namespace;
pub use object::ObjectId;
