//! Self-describing envelope that carries the IV alongside the ciphertext.

use bincode::Options;
use gs_aes_core::Block;
use serde::{Deserialize, Serialize};

use crate::engine::Aes128Engine;
use crate::error::{Error, Result};
use crate::mode::Mode;

/// Current envelope layout version.
pub const FRAME_VERSION: u8 = 1;

/// Fixed-width little-endian layout; a frame must consume every input byte.
fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Ciphertext bundled with the parameters needed to open it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedFrame {
    /// Layout version tag.
    pub version: u8,
    /// Chaining mode used for `payload`.
    pub mode: Mode,
    /// IV for chaining modes, `None` for ECB.
    pub iv: Option<Block>,
    /// Encrypted bytes.
    pub payload: Vec<u8>,
}

impl SealedFrame {
    /// Encrypts `plaintext` and records the mode and IV with it.
    pub fn seal(
        engine: &Aes128Engine,
        mode: Mode,
        iv: Option<Block>,
        plaintext: &[u8],
    ) -> Result<Self> {
        let iv = if mode.requires_iv() { iv } else { None };
        let payload = engine.encrypt(mode, iv.as_ref().map(|b| b.as_slice()), plaintext)?;
        Ok(Self {
            version: FRAME_VERSION,
            mode,
            iv,
            payload,
        })
    }

    /// Decrypts the payload with the recorded mode and IV.
    pub fn open(&self, engine: &Aes128Engine) -> Result<Vec<u8>> {
        self.check_version()?;
        engine.decrypt(
            self.mode,
            self.iv.as_ref().map(|b| b.as_slice()),
            &self.payload,
        )
    }

    /// Serializes the frame with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(wire_options().serialize(self)?)
    }

    /// Deserializes a frame with `bincode` and checks its version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let frame: Self = wire_options().deserialize(bytes)?;
        frame.check_version()?;
        Ok(frame)
    }

    fn check_version(&self) -> Result<()> {
        if self.version != FRAME_VERSION {
            return Err(Error::Frame(format!(
                "unsupported frame version {}",
                self.version
            )));
        }
        Ok(())
    }
}
