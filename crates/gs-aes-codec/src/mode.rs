//! Chaining mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Block chaining mode applied across a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Electronic codebook: blocks are transformed independently.
    Ecb,
    /// Cipher block chaining with a 16-byte IV.
    Cbc,
    /// Counter mode keyed by a 16-byte initial counter block.
    Ctr,
}

impl Mode {
    /// Whether the mode needs an IV.
    pub const fn requires_iv(self) -> bool {
        !matches!(self, Mode::Ecb)
    }

    /// Whether the mode pads plaintext to the block boundary.
    pub const fn is_padded(self) -> bool {
        !matches!(self, Mode::Ctr)
    }

    /// Lowercase name as accepted by [`Mode::from_str`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Ecb => "ecb",
            Mode::Cbc => "cbc",
            Mode::Ctr => "ctr",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ecb" => Ok(Mode::Ecb),
            "cbc" => Ok(Mode::Cbc),
            "ctr" => Ok(Mode::Ctr),
            _ => Err(Error::UnsupportedMode(s.to_string())),
        }
    }
}
