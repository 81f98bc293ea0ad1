use crate::value::ColumnType;

/// Errors from encoding or decoding a chunk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A value does not match the chunk's declared type.
    #[error("value {index} is {found}, column is {expected}")]
    TypeMismatch {
        index: usize,
        expected: ColumnType,
        found: ColumnType,
    },

    /// The byte stream lacks the name or type field.
    #[error("chunk header is incomplete")]
    MissingHeader,

    /// The type tag is not one this codec knows.
    #[error("unknown column type tag: {0:?}")]
    UnknownType(String),

    /// A text field is not valid UTF-8.
    #[error("field {field} is not valid UTF-8")]
    InvalidUtf8 { field: usize },

    /// A fixed-width value has the wrong number of bytes.
    #[error("value {index}: expected {expected} bytes, got {actual}")]
    InvalidWidth {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A boolean payload is neither 0 nor 1.
    #[error("value {index}: invalid boolean byte {byte:#04x}")]
    InvalidBoolean { index: usize, byte: u8 },

    /// An escape byte is followed by something that is not a valid escape.
    #[error("dangling escape at offset {offset}")]
    DanglingEscape { offset: usize },

    /// The null sentinel appears inside a field instead of forming it alone.
    #[error("malformed null sentinel at offset {offset}")]
    MalformedNull { offset: usize },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
