use tably_types::ObjectId;

/// Errors from building or reading recipe trees.
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("store error: {0}")]
    Store(#[from] tably_store::StoreError),

    #[error("schema error: {0}")]
    Schema(#[from] tably_schema::SchemaError),

    #[error("source error: {0}")]
    Tabular(#[from] tably_tabular::TabularError),

    /// A chunk could not be encoded or decoded.
    #[error("codec error in chunk {chunk}: {source}")]
    Codec {
        chunk: String,
        #[source]
        source: tably_codec::CodecError,
    },

    /// A recipe object is not valid recipe JSON or is internally inconsistent.
    #[error("corrupt recipe {id}: {reason}")]
    Corrupt { id: ObjectId, reason: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for recipe operations.
pub type RecipeResult<T> = Result<T, RecipeError>;
