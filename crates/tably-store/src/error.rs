use tably_types::{Namespace, ObjectId};

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("{namespace} object not found: {id}")]
    NotFound { id: ObjectId, namespace: Namespace },

    /// Content hash mismatch on read (data corruption).
    #[error("hash mismatch for {namespace} {id}: computed {computed}")]
    HashMismatch {
        id: ObjectId,
        namespace: Namespace,
        computed: ObjectId,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store root does not have the expected layout.
    #[error("store not initialized at {0}")]
    NotInitialized(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
