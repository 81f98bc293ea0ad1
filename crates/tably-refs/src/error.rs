//! Error types for reference operations.

use thiserror::Error;

/// Errors that can occur during reference operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The view was not found.
    #[error("view not found: {name}")]
    NotFound { name: String },

    /// A view with this name already exists.
    #[error("view already exists: {name}")]
    AlreadyExists { name: String },

    /// The view name is invalid.
    #[error("invalid view name {name:?}: {reason}")]
    InvalidViewName { name: String, reason: String },

    /// A ref file holds something that is neither empty nor a hash.
    #[error("corrupt ref {name}: {reason}")]
    Corrupt { name: String, reason: String },

    /// An in-memory lock was poisoned by a panicking writer.
    #[error("ref store lock poisoned")]
    LockPoisoned,

    /// I/O error during file-based ref operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for ref operations.
pub type RefResult<T> = std::result::Result<T, RefError>;
