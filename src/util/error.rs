//! Error types for the bamtex library.

use thiserror::Error;

/// Main error type for record decoding, encoding and editing.
#[derive(Error, Debug)]
pub enum Error {
    /// The record extent ended in the middle of a field
    #[error("Truncated record at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedRecord {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A length prefix declares more bytes than the record still holds
    #[error("Malformed length at offset {offset}: declared {declared} bytes, {available} available")]
    MalformedLength {
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// String is too long for its u16 length prefix
    #[error("String of {0} bytes does not fit a 16-bit length prefix")]
    StringTooLong(usize),

    /// Blob is too long for its u32 length prefix
    #[error("Blob of {0} bytes does not fit a 32-bit length prefix")]
    BlobTooLong(usize),

    /// Version text could not be parsed
    #[error("Invalid BAM version: {0}")]
    InvalidVersion(String),

    /// No codec registered for a type tag
    #[error("Unknown object type: {0}")]
    UnknownType(String),

    /// No editable field by that name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Editor-side value rejected
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that mean the input bytes are unusable.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::TruncatedRecord { .. } | Self::MalformedLength { .. } | Self::Utf8(_)
        )
    }
}

/// Result type alias for bamtex operations.
pub type Result<T> = std::result::Result<T, Error>;
