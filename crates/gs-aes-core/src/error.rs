//! Length violations detected at the core boundary.

use thiserror::Error;

/// Raised when untyped input does not match the fixed AES-128 sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LengthError {
    /// The key was not exactly 16 bytes.
    #[error("AES-128 key must be 16 bytes, got {actual}")]
    InvalidKeyLength {
        /// Length that was supplied.
        actual: usize,
    },
    /// The block was not exactly 16 bytes.
    #[error("AES block must be 16 bytes, got {actual}")]
    InvalidBlockLength {
        /// Length that was supplied.
        actual: usize,
    },
}
