//! Error types for seed derivation.

use core::fmt;

/// Errors that can occur while turning a mnemonic into a seed.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The phrase failed the BIP-39 wordlist or checksum check.
    InvalidMnemonic(bip39::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMnemonic(e) => write!(f, "invalid mnemonic phrase: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidMnemonic(e) => Some(e),
        }
    }
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        Self::InvalidMnemonic(err)
    }
}
