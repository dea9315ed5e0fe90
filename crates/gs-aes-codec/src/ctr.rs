//! Counter mode, as used for uplink frames.
//!
//! The counter block starts at the IV and is incremented as one 128-bit
//! big-endian integer per block. No padding is applied and encryption is its
//! own inverse.

use gs_aes_core::{encrypt_block, Block, KeySchedule, BLOCK_SIZE};

fn increment(counter: &mut Block) {
    let next = u128::from_be_bytes(*counter).wrapping_add(1);
    *counter = next.to_be_bytes();
}

/// XORs `data` in place with the keystream derived from `iv`.
pub fn apply_keystream(schedule: &KeySchedule, iv: &Block, data: &mut [u8]) {
    let mut counter = *iv;
    for chunk in data.chunks_mut(BLOCK_SIZE) {
        let keystream = encrypt_block(&counter, schedule);
        for (byte, k) in chunk.iter_mut().zip(keystream.iter()) {
            *byte ^= *k;
        }
        increment(&mut counter);
    }
}

/// Returns `input` transformed by the keystream; serves both directions.
pub fn xcrypt(schedule: &KeySchedule, iv: &Block, input: &[u8]) -> Vec<u8> {
    let mut out = input.to_vec();
    apply_keystream(schedule, iv, &mut out);
    out
}
