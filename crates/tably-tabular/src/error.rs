use std::path::PathBuf;

/// Errors from reading or writing tabular sources.
#[derive(Debug, thiserror::Error)]
pub enum TabularError {
    /// The source file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file is not well-formed CSV.
    #[error("cannot parse {path}: {reason}")]
    SourceUnparsable { path: PathBuf, reason: String },

    /// Columns of a table disagree on their row count.
    #[error("column {column} has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Writing the output failed.
    #[error("cannot write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Result alias for tabular operations.
pub type TabularResult<T> = Result<T, TabularError>;

impl TabularError {
    /// Classify a `csv` error raised while reading `path`.
    pub(crate) fn from_csv(path: &std::path::Path, err: csv::Error) -> Self {
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::SourceUnreadable {
                path: path.to_path_buf(),
                source,
            },
            _ => Self::SourceUnparsable {
                path: path.to_path_buf(),
                reason,
            },
        }
    }
}
