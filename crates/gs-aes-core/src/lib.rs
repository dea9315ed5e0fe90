//! AES-128 block cipher engine for the ground-station / on-board link.
//!
//! This crate follows FIPS-197 and provides:
//! - The AES-128 key schedule.
//! - Single-block encryption and decryption on fixed 16-byte arrays.
//! - Length-checked entry points for untyped byte slices.
//!
//! Nothing here allocates. The implementation aims for clarity and
//! testability rather than constant-time guarantees; it should not be treated
//! as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
pub mod round;
mod sbox;

pub use crate::block::{block_from_slice, xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{
    decrypt_block, decrypt_block_slice, encrypt_block, encrypt_block_slice, expand_key,
    expand_key_slice, ROUNDS,
};
pub use crate::error::LengthError;
pub use crate::key::{Key, KeySchedule, KEY_SIZE, ROUND_KEY_COUNT};
pub use crate::sbox::{inv_sbox, sbox};
