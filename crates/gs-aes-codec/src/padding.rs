//! PKCS#7 padding to the AES block boundary.

use gs_aes_core::BLOCK_SIZE;

use crate::error::{Error, Result};

/// Returns `data` followed by 1..=16 bytes, each equal to the pad length.
///
/// Padding is always added, so block-aligned input grows by a full block.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_len as u8);
    out
}

/// Strips and validates padding, returning the unpadded prefix.
pub fn unpad(data: &[u8]) -> Result<&[u8]> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(Error::PaddingError);
    }
    let pad_len = usize::from(data[data.len() - 1]);
    if pad_len == 0 || pad_len > BLOCK_SIZE {
        return Err(Error::PaddingError);
    }
    let (body, tail) = data.split_at(data.len() - pad_len);
    if tail.iter().any(|&b| usize::from(b) != pad_len) {
        return Err(Error::PaddingError);
    }
    Ok(body)
}
