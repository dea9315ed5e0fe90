//! AES-128 key schedule and block encryption/decryption.

use crate::block::{block_from_slice, Block};
use crate::error::LengthError;
use crate::key::{Key, KeySchedule, ROUND_KEY_COUNT};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

/// Number of cipher rounds for a 128-bit key.
pub const ROUNDS: usize = 10;

const RCON: [u8; ROUNDS] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

type Word = [u8; 4];

/// Derives the next round key from the previous one.
fn next_round_key(prev: &Block, rcon: u8) -> Block {
    let last: Word = [prev[12], prev[13], prev[14], prev[15]];
    // RotWord then SubWord, with the round constant folded into byte 0.
    let mut temp: Word = [sbox(last[1]), sbox(last[2]), sbox(last[3]), sbox(last[0])];
    temp[0] ^= rcon;

    let mut next = [0u8; 16];
    for word in 0..4 {
        for byte in 0..4 {
            let idx = word * 4 + byte;
            next[idx] = prev[idx] ^ temp[byte];
            temp[byte] = next[idx];
        }
    }
    next
}

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Key) -> KeySchedule {
    let mut round_keys = [[0u8; 16]; ROUND_KEY_COUNT];
    round_keys[0] = key.0;
    for (round, rcon) in RCON.iter().enumerate() {
        round_keys[round + 1] = next_round_key(&round_keys[round], *rcon);
    }
    KeySchedule::new(round_keys)
}

/// Expands an untyped key, failing unless it is exactly 16 bytes.
pub fn expand_key_slice(key: &[u8]) -> Result<KeySchedule, LengthError> {
    Key::try_from(key).map(|key| expand_key(&key))
}

/// Encrypts a single 16-byte block with a pre-expanded schedule.
pub fn encrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    let mut state = *block;

    add_round_key(&mut state, schedule.round_key(0));
    for round in 1..ROUNDS {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, schedule.round_key(round));
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, schedule.round_key(ROUNDS));

    state
}

/// Decrypts a single 16-byte block with a pre-expanded schedule.
pub fn decrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    let mut state = *block;

    add_round_key(&mut state, schedule.round_key(ROUNDS));
    for round in (1..ROUNDS).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, schedule.round_key(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, schedule.round_key(0));

    state
}

/// Encrypts an untyped block, failing unless it is exactly 16 bytes.
pub fn encrypt_block_slice(block: &[u8], schedule: &KeySchedule) -> Result<Block, LengthError> {
    let block = block_from_slice(block).ok_or(LengthError::InvalidBlockLength {
        actual: block.len(),
    })?;
    Ok(encrypt_block(&block, schedule))
}

/// Decrypts an untyped block, failing unless it is exactly 16 bytes.
pub fn decrypt_block_slice(block: &[u8], schedule: &KeySchedule) -> Result<Block, LengthError> {
    let block = block_from_slice(block).ok_or(LengthError::InvalidBlockLength {
        actual: block.len(),
    })?;
    Ok(decrypt_block(&block, schedule))
}
