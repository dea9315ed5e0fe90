//! Cipher block chaining mode.

use gs_aes_core::{decrypt_block, encrypt_block, xor_in_place, Block, KeySchedule, BLOCK_SIZE};

use crate::error::Result;
use crate::padding::{pad, unpad};
use crate::{ensure_aligned, ensure_ciphertext};

/// Encrypts block-aligned `data` in place without padding.
pub fn encrypt_blocks(schedule: &KeySchedule, iv: &Block, data: &mut [u8]) -> Result<()> {
    ensure_aligned(data.len())?;
    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = Block::default();
        block.copy_from_slice(chunk);
        xor_in_place(&mut block, &prev);
        prev = encrypt_block(&block, schedule);
        chunk.copy_from_slice(&prev);
    }
    Ok(())
}

/// Decrypts block-aligned `data` in place without removing padding.
pub fn decrypt_blocks(schedule: &KeySchedule, iv: &Block, data: &mut [u8]) -> Result<()> {
    ensure_aligned(data.len())?;
    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut cipher_block = Block::default();
        cipher_block.copy_from_slice(chunk);
        let mut plain = decrypt_block(&cipher_block, schedule);
        xor_in_place(&mut plain, &prev);
        chunk.copy_from_slice(&plain);
        prev = cipher_block;
    }
    Ok(())
}

/// Pads and encrypts `plaintext`, chaining from `iv`.
pub fn encrypt(schedule: &KeySchedule, iv: &Block, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut out = pad(plaintext);
    encrypt_blocks(schedule, iv, &mut out)?;
    Ok(out)
}

/// Decrypts `ciphertext` chained from `iv` and strips its padding.
pub fn decrypt(schedule: &KeySchedule, iv: &Block, ciphertext: &[u8]) -> Result<Vec<u8>> {
    ensure_ciphertext(ciphertext.len())?;
    let mut out = ciphertext.to_vec();
    decrypt_blocks(schedule, iv, &mut out)?;
    let plain_len = unpad(&out)?.len();
    out.truncate(plain_len);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_aes_core::{expand_key, Key};

    const SP_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
    const SP_IV: &str = "000102030405060708090a0b0c0d0e0f";
    const SP_PLAIN: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51\
                            30c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710";
    const SP_CIPHER: &str = "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2\
                             73bed6b8e3c1743b7116e69e222295163ff1caa1681fac09120eca307586e1a7";

    fn block(hex_str: &str) -> Block {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    #[test]
    fn sp800_38a_cbc_vectors() {
        let ks = expand_key(&Key::from(block(SP_KEY)));
        let iv = block(SP_IV);
        let mut data = hex::decode(SP_PLAIN).unwrap();
        encrypt_blocks(&ks, &iv, &mut data).unwrap();
        assert_eq!(hex::encode(&data), SP_CIPHER);
        decrypt_blocks(&ks, &iv, &mut data).unwrap();
        assert_eq!(hex::encode(&data), SP_PLAIN);
    }

    #[test]
    fn padded_round_trip_and_chaining() {
        let ks = expand_key(&Key::from(block(SP_KEY)));
        let iv = block(SP_IV);
        let plaintext = [0x33u8; 40];
        let ct = encrypt(&ks, &iv, &plaintext).unwrap();
        assert_eq!(ct.len(), 48);
        assert_ne!(ct[..16], ct[16..32]);
        assert_eq!(decrypt(&ks, &iv, &ct).unwrap(), plaintext);
    }

    #[test]
    fn different_iv_changes_ciphertext() {
        let ks = expand_key(&Key::from(block(SP_KEY)));
        let a = encrypt(&ks, &[0u8; 16], b"telemetry").unwrap();
        let b = encrypt(&ks, &[1u8; 16], b"telemetry").unwrap();
        assert_ne!(a, b);
    }
}
