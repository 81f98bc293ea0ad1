use std::path::PathBuf;

/// Errors from the schema cache.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The cache file exists but is not a valid cache.
    #[error("corrupt schema cache at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Inferring a schema from the source failed.
    #[error(transparent)]
    Source(#[from] tably_tabular::TabularError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for schema cache operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
