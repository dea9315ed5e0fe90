//! Key types for AES-128.

use crate::block::Block;
use crate::error::LengthError;

/// Size of an AES-128 key in bytes.
pub const KEY_SIZE: usize = 16;

/// Number of round keys produced by the AES-128 expansion.
pub const ROUND_KEY_COUNT: usize = 11;

/// AES-128 secret key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Key(pub [u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = LengthError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_SIZE] = value
            .try_into()
            .map_err(|_| LengthError::InvalidKeyLength {
                actual: value.len(),
            })?;
        Ok(Self(bytes))
    }
}

impl core::fmt::Debug for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Key(..)")
    }
}

/// Expanded round keys for AES-128, immutable once derived.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KeySchedule([Block; ROUND_KEY_COUNT]);

impl KeySchedule {
    pub(crate) const fn new(round_keys: [Block; ROUND_KEY_COUNT]) -> Self {
        Self(round_keys)
    }

    /// Returns the round key at the requested index (0..=10).
    ///
    /// # Panics
    ///
    /// Panics if `round` is greater than 10.
    #[inline]
    pub fn round_key(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Returns all eleven round keys in order.
    pub fn round_keys(&self) -> &[Block; ROUND_KEY_COUNT] {
        &self.0
    }
}

impl core::fmt::Debug for KeySchedule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("KeySchedule(..)")
    }
}
