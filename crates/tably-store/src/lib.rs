//! Content-addressed object storage for tably.
//!
//! Every chunk, recipe and manifest is stored as an immutable object
//! identified by the SHA-256 hash of its bytes, inside one of three disjoint
//! [`Namespace`](tably_types::Namespace)s.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`] -- one directory per namespace, file name = hex hash
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. `put` is idempotent: at most one physical write per hash per namespace.
//! 3. There is no update or delete.
//! 4. The store never interprets object contents.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod fsutil;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use fsutil::write_atomic;
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
