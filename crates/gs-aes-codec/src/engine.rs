//! Engine handle exposed to the ground-station and OBC protocol layers.

use std::fmt;

use gs_aes_core::{
    block_from_slice, decrypt_block_slice, encrypt_block_slice, expand_key, Block, Key,
    KeySchedule, BLOCK_SIZE,
};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::mode::Mode;
use crate::{cbc, ctr, ecb};

/// An AES-128 engine bound to one key.
///
/// The schedule is derived once in [`Aes128Engine::new`] and never mutated,
/// so a single engine can be shared across threads by reference.
#[derive(Clone)]
pub struct Aes128Engine {
    schedule: KeySchedule,
}

impl Aes128Engine {
    /// Expands `key` into a new engine. Fails unless the key is 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key = Key::try_from(key)?;
        Ok(Self::from_key(&key))
    }

    /// Builds an engine from an already typed key.
    pub fn from_key(key: &Key) -> Self {
        debug!("expanding AES-128 key schedule");
        Self {
            schedule: expand_key(key),
        }
    }

    /// The read-only round key schedule.
    pub fn schedule(&self) -> &KeySchedule {
        &self.schedule
    }

    /// Encrypts `plaintext` under `mode`.
    ///
    /// ECB and CBC output is always a non-empty multiple of 16 bytes. CTR
    /// output has the same length as the input.
    pub fn encrypt(&self, mode: Mode, iv: Option<&[u8]>, plaintext: &[u8]) -> Result<Vec<u8>> {
        debug!("encrypting {} bytes with {mode}", plaintext.len());
        match mode {
            Mode::Ecb => {
                ignore_iv(mode, iv);
                ecb::encrypt(&self.schedule, plaintext)
            }
            Mode::Cbc => cbc::encrypt(&self.schedule, &require_iv(mode, iv)?, plaintext),
            Mode::Ctr => Ok(ctr::xcrypt(&self.schedule, &require_iv(mode, iv)?, plaintext)),
        }
    }

    /// Decrypts `ciphertext` under `mode`, validating and stripping padding
    /// for the padded modes.
    pub fn decrypt(&self, mode: Mode, iv: Option<&[u8]>, ciphertext: &[u8]) -> Result<Vec<u8>> {
        debug!("decrypting {} bytes with {mode}", ciphertext.len());
        let result = match mode {
            Mode::Ecb => {
                ignore_iv(mode, iv);
                ecb::decrypt(&self.schedule, ciphertext)
            }
            Mode::Cbc => cbc::decrypt(&self.schedule, &require_iv(mode, iv)?, ciphertext),
            Mode::Ctr => Ok(ctr::xcrypt(&self.schedule, &require_iv(mode, iv)?, ciphertext)),
        };
        if let Err(Error::PaddingError) = &result {
            warn!("{mode} ciphertext of {} bytes has malformed padding", ciphertext.len());
        }
        result
    }

    /// Encrypts `plaintext` and returns `iv || ciphertext`, the layout
    /// carried in uplink frames after the AX.25 header.
    pub fn encrypt_iv_prefixed(
        &self,
        mode: Mode,
        iv: &Block,
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let ciphertext = self.encrypt(mode, Some(iv.as_slice()), plaintext)?;
        let mut out = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        out.extend_from_slice(iv);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Splits the leading 16-byte IV off `buf` and decrypts the remainder.
    ///
    /// Buffers shorter than one block fail with
    /// [`Error::InvalidBlockLength`].
    pub fn decrypt_iv_prefixed(&self, mode: Mode, buf: &[u8]) -> Result<Vec<u8>> {
        if buf.len() < BLOCK_SIZE {
            return Err(Error::InvalidBlockLength(buf.len()));
        }
        let (iv, ciphertext) = buf.split_at(BLOCK_SIZE);
        self.decrypt(mode, Some(iv), ciphertext)
    }

    /// Encrypts one untyped block; fails unless it is 16 bytes.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<Block> {
        Ok(encrypt_block_slice(block, &self.schedule)?)
    }

    /// Decrypts one untyped block; fails unless it is 16 bytes.
    pub fn decrypt_block(&self, block: &[u8]) -> Result<Block> {
        Ok(decrypt_block_slice(block, &self.schedule)?)
    }
}

impl fmt::Debug for Aes128Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes128Engine").finish_non_exhaustive()
    }
}

fn require_iv(mode: Mode, iv: Option<&[u8]>) -> Result<Block> {
    let bytes = iv.ok_or(Error::MissingIv(mode))?;
    block_from_slice(bytes).ok_or(Error::InvalidIvLength(bytes.len()))
}

fn ignore_iv(mode: Mode, iv: Option<&[u8]>) {
    if iv.is_some() {
        debug!("ignoring IV supplied for {mode}");
    }
}

/// One-shot encryption with a fresh key schedule.
pub fn encrypt(plaintext: &[u8], key: &[u8], mode: Mode, iv: Option<&[u8]>) -> Result<Vec<u8>> {
    Aes128Engine::new(key)?.encrypt(mode, iv, plaintext)
}

/// One-shot decryption with a fresh key schedule.
pub fn decrypt(ciphertext: &[u8], key: &[u8], mode: Mode, iv: Option<&[u8]>) -> Result<Vec<u8>> {
    Aes128Engine::new(key)?.decrypt(mode, iv, ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    #[test]
    fn init_rejects_bad_key_lengths() {
        assert!(matches!(
            Aes128Engine::new(&[0u8; 15]),
            Err(Error::InvalidKeyLength(15))
        ));
        assert!(matches!(
            Aes128Engine::new(&[0u8; 17]),
            Err(Error::InvalidKeyLength(17))
        ));
    }

    #[test]
    fn chaining_modes_require_a_sixteen_byte_iv() {
        let engine = Aes128Engine::new(&KEY).unwrap();
        for mode in [Mode::Cbc, Mode::Ctr] {
            assert!(matches!(
                engine.encrypt(mode, None, b"x"),
                Err(Error::MissingIv(m)) if m == mode
            ));
            assert!(matches!(
                engine.decrypt(mode, Some(&[0u8; 8][..]), &[0u8; 16]),
                Err(Error::InvalidIvLength(8))
            ));
        }
    }

    #[test]
    fn ecb_ignores_iv() {
        let engine = Aes128Engine::new(&KEY).unwrap();
        let with_iv = engine.encrypt(Mode::Ecb, Some(&[5u8; 3][..]), b"abc").unwrap();
        let without = engine.encrypt(Mode::Ecb, None, b"abc").unwrap();
        assert_eq!(with_iv, without);
    }

    #[test]
    fn missing_iv_message_says_missing() {
        let engine = Aes128Engine::new(&KEY).unwrap();
        let err = engine.decrypt(Mode::Cbc, None, &[0u8; 16]).unwrap_err();
        assert_eq!(err.to_string(), "cbc mode requires an IV but none was supplied");
    }

    #[test]
    fn iv_prefixed_round_trip() {
        let engine = Aes128Engine::new(&KEY).unwrap();
        let iv = [0xa5u8; 16];
        for mode in [Mode::Cbc, Mode::Ctr] {
            let buf = engine
                .encrypt_iv_prefixed(mode, &iv, b"ping immediate")
                .unwrap();
            assert_eq!(&buf[..16], &iv);
            assert_eq!(
                &buf[16..],
                engine
                    .encrypt(mode, Some(&iv[..]), b"ping immediate")
                    .unwrap()
                    .as_slice()
            );
            assert_eq!(
                engine.decrypt_iv_prefixed(mode, &buf).unwrap(),
                b"ping immediate"
            );
        }
    }

    #[test]
    fn iv_prefixed_rejects_short_buffers() {
        let engine = Aes128Engine::new(&KEY).unwrap();
        assert!(matches!(
            engine.decrypt_iv_prefixed(Mode::Ctr, &[0u8; 15]),
            Err(Error::InvalidBlockLength(15))
        ));
        assert!(matches!(
            engine.decrypt_iv_prefixed(Mode::Cbc, &[]),
            Err(Error::InvalidBlockLength(0))
        ));
        // An IV with no ciphertext behind it is a valid, empty CTR message.
        assert!(engine
            .decrypt_iv_prefixed(Mode::Ctr, &[0u8; 16])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn block_interface_checks_length() {
        let engine = Aes128Engine::new(&KEY).unwrap();
        assert!(matches!(
            engine.encrypt_block(&[0u8; 15]),
            Err(Error::InvalidBlockLength(15))
        ));
        let ct = engine.encrypt_block(&[0u8; 16]).unwrap();
        assert_eq!(engine.decrypt_block(&ct).unwrap(), [0u8; 16]);
    }

    #[test]
    fn debug_does_not_leak_schedule() {
        let engine = Aes128Engine::new(&KEY).unwrap();
        assert_eq!(format!("{engine:?}"), "Aes128Engine { .. }");
    }

    #[test]
    fn one_shot_helpers_match_engine() {
        let iv = [0x11u8; 16];
        let ct = encrypt(b"beacon", &KEY, Mode::Cbc, Some(&iv[..])).unwrap();
        let engine = Aes128Engine::new(&KEY).unwrap();
        assert_eq!(engine.encrypt(Mode::Cbc, Some(&iv[..]), b"beacon").unwrap(), ct);
        assert_eq!(decrypt(&ct, &KEY, Mode::Cbc, Some(&iv[..])).unwrap(), b"beacon");
    }
}
