//! Error types for key derivation and search.

use core::fmt;

/// Errors that can occur during key derivation, encoding or search.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The mnemonic failed validation.
    Mnemonic(keyfind_core::Error),
    /// Seed length is outside the 16..=64 byte range BIP-32 allows.
    InvalidSeedLength(usize),
    /// The seed produced an unusable master key.
    SeedDerivation,
    /// A derivation path string could not be parsed.
    InvalidPathSyntax(String),
    /// Hardened derivation was attempted on a public-only node.
    HardenedDerivationRequiresPrivateKey,
    /// The derived child scalar or point is invalid for this index.
    InvalidChildKey,
    /// The node is already at the deepest level a key tree can hold.
    MaxDepthExceeded,
    /// The private key scalar is zero or not below the curve order.
    InvalidPrivateKey,
    /// The address is not valid Base58Check for the active network.
    InvalidAddress(String),
    /// The address is well-formed but not of a searchable type.
    UnsupportedAddressType(u8),
    /// The WIF string is malformed.
    InvalidWif(&'static str),
}

impl Error {
    /// Whether this error only rules out a single candidate.
    ///
    /// The searcher skips the affected index or template on these and keeps
    /// going.
    #[must_use]
    pub const fn is_candidate_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidChildKey | Self::HardenedDerivationRequiresPrivateKey
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mnemonic(e) => write!(f, "{e}"),
            Self::InvalidSeedLength(n) => {
                write!(f, "invalid seed length {n}, must be between 16 and 64 bytes")
            }
            Self::SeedDerivation => write!(f, "seed does not produce a valid master key"),
            Self::InvalidPathSyntax(p) => write!(f, "invalid derivation path: {p}"),
            Self::HardenedDerivationRequiresPrivateKey => {
                write!(f, "hardened derivation requires a private key")
            }
            Self::InvalidChildKey => write!(f, "derived child key is invalid"),
            Self::MaxDepthExceeded => write!(f, "maximum derivation depth exceeded"),
            Self::InvalidPrivateKey => write!(f, "invalid private key"),
            Self::InvalidAddress(a) => write!(f, "invalid address: {a}"),
            Self::UnsupportedAddressType(v) => {
                write!(f, "unsupported address type with version byte {v}")
            }
            Self::InvalidWif(reason) => write!(f, "invalid WIF: {reason}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mnemonic(e) => Some(e),
            _ => None,
        }
    }
}

impl From<keyfind_core::Error> for Error {
    fn from(err: keyfind_core::Error) -> Self {
        Self::Mnemonic(err)
    }
}
