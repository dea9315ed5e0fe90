use gs_aes_codec::{cbc, ecb, Aes128Engine, Error, Mode, SealedFrame};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const FIPS_KEY: &str = "000102030405060708090a0b0c0d0e0f";

fn fips_engine() -> Aes128Engine {
    Aes128Engine::new(&hex::decode(FIPS_KEY).unwrap()).unwrap()
}

#[test]
fn engine_matches_fips197_block_vector() {
    let engine = fips_engine();
    let plain = hex::decode("00112233445566778899aabbccddeeff").unwrap();
    let ct = engine.encrypt_block(&plain).unwrap();
    assert_eq!(hex::encode(ct), "69c4e0d86a7b0430d8cdb78070b4c55a");
}

#[test]
fn round_trip_every_mode_and_length() {
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
    for _ in 0..20 {
        let key: [u8; 16] = rng.gen();
        let iv: [u8; 16] = rng.gen();
        let engine = Aes128Engine::new(&key).unwrap();
        for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 100, 255] {
            let mut plaintext = vec![0u8; len];
            rng.fill_bytes(&mut plaintext);
            for mode in [Mode::Ecb, Mode::Cbc, Mode::Ctr] {
                let ct = engine.encrypt(mode, Some(&iv[..]), &plaintext).unwrap();
                if mode.is_padded() {
                    assert_eq!(ct.len(), (len / 16 + 1) * 16);
                } else {
                    assert_eq!(ct.len(), len);
                }
                let pt = engine.decrypt(mode, Some(&iv[..]), &ct).unwrap();
                assert_eq!(pt, plaintext, "mode {mode}, len {len}");
            }
        }
    }
}

#[test]
fn empty_plaintext_is_one_block_of_padding() {
    let engine = fips_engine();
    let ct = engine.encrypt(Mode::Ecb, None, &[]).unwrap();
    assert_eq!(ct.len(), 16);
    let mut raw = ct.clone();
    ecb::decrypt_blocks(engine.schedule(), &mut raw).unwrap();
    assert_eq!(raw, [0x10u8; 16]);
    assert!(engine.decrypt(Mode::Ecb, None, &ct).unwrap().is_empty());
}

#[test]
fn inconsistent_padding_is_reported() {
    let engine = fips_engine();
    let mut block = [0u8; 16];
    block[12..].copy_from_slice(&[0x01, 0x02, 0x05, 0x05]);

    let mut ecb_ct = block;
    ecb::encrypt_blocks(engine.schedule(), &mut ecb_ct).unwrap();
    assert!(matches!(
        engine.decrypt(Mode::Ecb, None, &ecb_ct),
        Err(Error::PaddingError)
    ));

    let iv = [0x5cu8; 16];
    let mut cbc_ct = block;
    cbc::encrypt_blocks(engine.schedule(), &iv, &mut cbc_ct).unwrap();
    assert!(matches!(
        engine.decrypt(Mode::Cbc, Some(&iv[..]), &cbc_ct),
        Err(Error::PaddingError)
    ));
}

#[test]
fn tampered_final_block_does_not_yield_partial_output() {
    let engine = fips_engine();
    let iv = [3u8; 16];
    let mut ct = engine
        .encrypt(Mode::Cbc, Some(&iv[..]), b"set beacon period 30s")
        .unwrap();
    let last = ct.len() - 1;
    // Flipping the previous block's last byte flips the final padding byte.
    ct[last - 16] ^= 0x20;
    assert!(engine.decrypt(Mode::Cbc, Some(&iv[..]), &ct).is_err());
}

#[test]
fn unsupported_mode_comes_from_parsing() {
    assert!(matches!(
        "ofb".parse::<Mode>(),
        Err(Error::UnsupportedMode(_))
    ));
}

#[test]
fn shared_engine_across_threads() {
    let engine = fips_engine();
    let iv = [9u8; 16];
    std::thread::scope(|scope| {
        for id in 0u8..4 {
            let engine = &engine;
            scope.spawn(move || {
                let msg = vec![id; 64 + usize::from(id)];
                let ct = engine.encrypt(Mode::Cbc, Some(&iv[..]), &msg).unwrap();
                assert_eq!(engine.decrypt(Mode::Cbc, Some(&iv[..]), &ct).unwrap(), msg);
            });
        }
    });
}

#[test]
fn sealed_frame_survives_bytes() {
    let engine = fips_engine();
    let frame = SealedFrame::seal(&engine, Mode::Ctr, Some([0xf0; 16]), b"ping").unwrap();
    let reopened = SealedFrame::from_bytes(&frame.to_bytes().unwrap()).unwrap();
    assert_eq!(reopened.open(&engine).unwrap(), b"ping");
}

#[test]
fn uplink_payload_carries_iv_ahead_of_ciphertext() {
    let engine = fips_engine();
    let iv: [u8; 16] = core::array::from_fn(|i| i as u8);
    let command = b"ping immediate";

    // AX.25 PID byte, then the IV-prefixed encrypted command.
    let mut frame = vec![0xf0];
    frame.extend(engine.encrypt_iv_prefixed(Mode::Ctr, &iv, command).unwrap());
    assert_eq!(&frame[1..17], &iv);
    assert_eq!(frame.len(), 1 + 16 + command.len());

    let opened = engine.decrypt_iv_prefixed(Mode::Ctr, &frame[1..]).unwrap();
    assert_eq!(opened, command);
    assert!(matches!(
        engine.decrypt_iv_prefixed(Mode::Ctr, &frame[1..9]),
        Err(Error::InvalidBlockLength(8))
    ));
}
