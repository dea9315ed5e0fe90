//! Buffer codec and engine handle over the AES-128 core.
//!
//! Provides:
//! - ECB and CBC with PKCS#7 padding, plus unpadded CTR.
//! - [`Aes128Engine`], the handle the protocol stack holds per key.
//! - [`SealedFrame`], an envelope that ships the IV with the ciphertext.
//!
//! The codec is stateless across calls. FEC framing is applied by callers
//! before encryption or after decryption and is opaque here.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cbc;
pub mod ctr;
pub mod ecb;
mod engine;
mod error;
mod frame;
mod mode;
pub mod padding;

pub use gs_aes_core::{Block, Key, KeySchedule, BLOCK_SIZE, KEY_SIZE};

pub use crate::engine::{decrypt, encrypt, Aes128Engine};
pub use crate::error::{Error, Result};
pub use crate::frame::{SealedFrame, FRAME_VERSION};
pub use crate::mode::Mode;

/// Rejects buffers that are not a multiple of the block size.
pub(crate) fn ensure_aligned(len: usize) -> Result<()> {
    if len % BLOCK_SIZE != 0 {
        return Err(Error::InvalidBlockLength(len));
    }
    Ok(())
}

/// Rejects padded-mode ciphertexts that cannot hold at least one block.
pub(crate) fn ensure_ciphertext(len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::InvalidBlockLength(len));
    }
    ensure_aligned(len)
}
