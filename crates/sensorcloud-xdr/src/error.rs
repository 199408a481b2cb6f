//! Decode error types.

use thiserror::Error;

/// Errors that can occur while decoding XDR data.
///
/// Every variant is terminal for the decode operation in progress; the
/// reader makes no guarantee about its position after returning an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XdrError {
    /// The data ended before the requested value could be read.
    #[error("unexpected end of data")]
    UnexpectedEndOfData,

    /// A declared opaque length exceeds the caller-supplied limit.
    ///
    /// The declared payload is not consumed, so a corrupt or hostile length
    /// field cannot trigger a large allocation.
    #[error("declared length {actual} exceeds the read limit of {limit} bytes")]
    LengthLimitExceeded {
        /// The maximum number of bytes the caller allowed.
        limit: usize,
        /// The length declared in the data.
        actual: usize,
    },

    /// A declared opaque length is negative.
    #[error("declared length {length} is negative")]
    InvalidLength {
        /// The length declared in the data.
        length: i32,
    },

    /// A string payload is not valid UTF-8.
    #[error("string data is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
