use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("not a tably repository (or any parent up to /): {0}")]
    RepositoryNotFound(PathBuf),

    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("another tably process holds the repository lock at {0}")]
    Locked(PathBuf),

    #[error("{} is outside the repository", .0.display())]
    OutsideRepository(PathBuf),

    #[error("invalid config at {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("store error: {0}")]
    Store(#[from] tably_store::StoreError),

    #[error(transparent)]
    Tabular(#[from] tably_tabular::TabularError),

    #[error("schema cache error: {0}")]
    Schema(#[from] tably_schema::SchemaError),

    #[error("recipe error: {0}")]
    Recipe(#[from] tably_recipe::RecipeError),

    #[error("ref error: {0}")]
    Ref(#[from] tably_refs::RefError),

    #[error("index error: {0}")]
    Index(#[from] tably_index::IndexError),

    #[error(transparent)]
    Ledger(#[from] tably_ledger::LedgerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
