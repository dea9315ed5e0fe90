//! Seals an uplink command in a CBC frame and opens it again.

use gs_aes_codec::{Aes128Engine, Mode, SealedFrame};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn main() -> Result<(), gs_aes_codec::Error> {
    // Deterministic seed for reproducibility in the example.
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut key = [0u8; 16];
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);

    let engine = Aes128Engine::new(&key)?;
    let frame = SealedFrame::seal(&engine, Mode::Cbc, Some(iv), b"PING")?;
    let wire = frame.to_bytes()?;
    let opened = SealedFrame::from_bytes(&wire)?.open(&engine)?;
    assert_eq!(opened, b"PING");

    println!(
        "sealed {} plaintext bytes into {} wire bytes",
        opened.len(),
        wire.len()
    );
    Ok(())
}
