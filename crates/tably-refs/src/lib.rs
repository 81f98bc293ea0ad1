//! Views and HEAD for tably.
//!
//! A **view** is a named, movable pointer to a manifest (a commit), stored
//! as `refs/heads/<name>`. A freshly created repository has a `main` view
//! that points nowhere yet.
//!
//! **HEAD** is either symbolic (`ref: refs/heads/<name>`), naming the active
//! view, or detached, holding a raw manifest hash.
//!
//! # Modules
//!
//! - [`error`]: Error types for ref operations
//! - [`types`]: [`Head`] and [`View`]
//! - [`traits`]: The [`RefStore`] trait defining the storage interface
//! - [`names`]: View name validation
//! - [`fs`]: [`FsRefStore`], the on-disk layout
//! - [`memory`]: In-memory [`InMemoryRefStore`] for tests

pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use error::{RefError, RefResult};
pub use fs::FsRefStore;
pub use memory::InMemoryRefStore;
pub use names::validate_view_name;
pub use traits::RefStore;
pub use types::{Head, View, HEADS_PREFIX};
