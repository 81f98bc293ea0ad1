use tably_types::ObjectId;

/// Errors produced by history operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("nothing to commit")]
    NothingToCommit,

    #[error("HEAD is detached; create or activate a view before committing")]
    DetachedHeadCommit,

    #[error("no commits yet")]
    NoCommitsYet,

    #[error("view already exists: {0}")]
    AlreadyExists(String),

    #[error("uncommitted staged changes; commit them before activating")]
    DirtyIndex,

    #[error("HEAD is not set")]
    HeadMissing,

    /// Neither a view nor a stored manifest.
    #[error("no view or commit named {0}")]
    UnknownTarget(String),

    #[error("commit not found: {0}")]
    ManifestNotFound(ObjectId),

    #[error("corrupt manifest {id}: {reason}")]
    CorruptManifest { id: ObjectId, reason: String },

    /// A manifest referenced from the chain is missing from the store.
    #[error("corrupted history: manifest {missing} is missing")]
    CorruptedHistory { missing: ObjectId },

    #[error("ref error: {0}")]
    Ref(#[from] tably_refs::RefError),

    #[error("store error: {0}")]
    Store(#[from] tably_store::StoreError),

    #[error("recipe error: {0}")]
    Recipe(#[from] tably_recipe::RecipeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for history operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
