//! Error taxonomy for the buffer codec and engine handle.

use gs_aes_core::LengthError;
use thiserror::Error;

use crate::mode::Mode;

/// Every failure the codec can report. All are scoped to a single call.
#[derive(Debug, Error)]
pub enum Error {
    /// The key was not 16 bytes.
    #[error("invalid key length: expected 16 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// A chaining mode was given an IV that is not 16 bytes.
    #[error("invalid IV length: expected 16 bytes, got {0}")]
    InvalidIvLength(usize),

    /// A chaining mode was called without an IV.
    #[error("{0} mode requires an IV but none was supplied")]
    MissingIv(Mode),

    /// A block, or a ciphertext expected to be block aligned, had the wrong size.
    #[error("invalid block length: {0} bytes is not a positive multiple of 16")]
    InvalidBlockLength(usize),

    /// The mode name is not one of ecb, cbc or ctr.
    #[error("unsupported cipher mode: {0}")]
    UnsupportedMode(String),

    /// The trailing padding of a decrypted buffer is malformed.
    #[error("malformed padding")]
    PaddingError,

    /// A sealed frame could not be encoded or decoded.
    #[error("frame error: {0}")]
    Frame(String),
}

impl From<LengthError> for Error {
    fn from(value: LengthError) -> Self {
        match value {
            LengthError::InvalidKeyLength { actual } => Error::InvalidKeyLength(actual),
            LengthError::InvalidBlockLength { actual } => Error::InvalidBlockLength(actual),
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(value: bincode::Error) -> Self {
        Error::Frame(value.to_string())
    }
}

/// Codec result alias.
pub type Result<T> = std::result::Result<T, Error>;
