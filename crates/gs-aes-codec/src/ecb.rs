//! Electronic codebook mode.

use gs_aes_core::{decrypt_block, encrypt_block, Block, KeySchedule, BLOCK_SIZE};

use crate::error::Result;
use crate::padding::{pad, unpad};
use crate::{ensure_aligned, ensure_ciphertext};

/// Encrypts block-aligned `data` in place without padding.
pub fn encrypt_blocks(schedule: &KeySchedule, data: &mut [u8]) -> Result<()> {
    ensure_aligned(data.len())?;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = Block::default();
        block.copy_from_slice(chunk);
        chunk.copy_from_slice(&encrypt_block(&block, schedule));
    }
    Ok(())
}

/// Decrypts block-aligned `data` in place without removing padding.
pub fn decrypt_blocks(schedule: &KeySchedule, data: &mut [u8]) -> Result<()> {
    ensure_aligned(data.len())?;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = Block::default();
        block.copy_from_slice(chunk);
        chunk.copy_from_slice(&decrypt_block(&block, schedule));
    }
    Ok(())
}

/// Pads and encrypts `plaintext`.
pub fn encrypt(schedule: &KeySchedule, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut out = pad(plaintext);
    encrypt_blocks(schedule, &mut out)?;
    Ok(out)
}

/// Decrypts `ciphertext` and strips its padding.
pub fn decrypt(schedule: &KeySchedule, ciphertext: &[u8]) -> Result<Vec<u8>> {
    ensure_ciphertext(ciphertext.len())?;
    let mut out = ciphertext.to_vec();
    decrypt_blocks(schedule, &mut out)?;
    let plain_len = unpad(&out)?.len();
    out.truncate(plain_len);
    Ok(out)
}
