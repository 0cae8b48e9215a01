//! Error types for encoding and decoding.

use thiserror::Error;

/// Result type for encoding operations.
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

/// Errors raised while encoding.
///
/// Every length prefix on the wire is fixed-width, so the only way an
/// encode can fail is a value too large for its prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// String whose UTF-8 byte length + 1 does not fit the u16 prefix.
    #[error("string of {len} bytes exceeds the 16-bit length prefix")]
    StringTooLong { len: usize },

    /// Array with more elements than the u16 count can carry.
    #[error("array of {len} elements exceeds the 16-bit count prefix")]
    ArrayTooLarge { len: usize },

    /// Blob with more bytes than the u32 count can carry.
    #[error("blob of {len} bytes exceeds the 32-bit length prefix")]
    BlobTooLarge { len: usize },
}

/// Errors recorded while decoding.
///
/// A [`Reader`](crate::Reader) retains the first of these and returns
/// defaults from every later read; callers observe it through
/// [`Reader::finish`](crate::Reader::finish).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not enough bytes remaining for the requested field.
    #[error("input truncated: needed {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    /// String with a zero length or without its zero terminator.
    #[error("malformed string at offset {at}: missing terminator")]
    MalformedString { at: usize },

    /// Blob claimed more memory than could be reserved.
    #[error("failed to allocate {requested} bytes for blob")]
    AllocationFailure { requested: usize },
}

impl DecodeError {
    /// Creates a truncation error.
    pub fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }
}
