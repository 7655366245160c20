//! Network profiles.
//!
//! A [`NetworkProfile`] carries every network-specific constant the key
//! tree and encoders need. Profiles are plain values: build one at startup
//! and hand out references.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Built-in networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    /// Junkcoin mainnet.
    #[default]
    Junkcoin,
    /// Bitcoin mainnet.
    Bitcoin,
}

impl Network {
    /// Build the profile for this network.
    #[must_use]
    pub fn profile(self) -> NetworkProfile {
        match self {
            Self::Junkcoin => NetworkProfile {
                name: "junkcoin".into(),
                message_prefix: "Junkcoin Signed Message:\n".into(),
                bech32: "junk".into(),
                bip32: Bip32Versions::XPUB_XPRV,
                pub_key_hash: 16,
                script_hash: 5,
                wif: 144,
            },
            Self::Bitcoin => NetworkProfile {
                name: "bitcoin".into(),
                message_prefix: "Bitcoin Signed Message:\n".into(),
                bech32: "bc".into(),
                bip32: Bip32Versions::XPUB_XPRV,
                pub_key_hash: 0x00,
                script_hash: 0x05,
                wif: 0x80,
            },
        }
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Junkcoin => "junkcoin",
            Self::Bitcoin => "bitcoin",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError(String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown network '{}', expected one of: junkcoin, bitcoin",
            self.0
        )
    }
}

impl std::error::Error for ParseNetworkError {}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "junkcoin" | "junk" | "jkc" => Ok(Self::Junkcoin),
            "bitcoin" | "btc" | "mainnet" => Ok(Self::Bitcoin),
            _ => Err(ParseNetworkError(s.into())),
        }
    }
}

/// Extended key version bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bip32Versions {
    /// Version prefix of serialized extended public keys.
    pub public: u32,
    /// Version prefix of serialized extended private keys.
    pub private: u32,
}

impl Bip32Versions {
    /// The `xpub` / `xprv` versions shared by Bitcoin and its forks.
    pub const XPUB_XPRV: Self = Self {
        public: 0x0488_B21E,
        private: 0x0488_ADE4,
    };
}

/// Network-specific encoding parameters.
///
/// Field names follow the network objects used by JavaScript wallet
/// libraries, so a profile file reads the same as those definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NetworkProfile {
    /// Display name.
    pub name: String,
    /// Prefix mixed into signed-message hashes.
    pub message_prefix: String,
    /// Human-readable part of segwit addresses.
    pub bech32: String,
    /// Extended key version bytes.
    pub bip32: Bip32Versions,
    /// Version byte of pay-to-public-key-hash addresses.
    pub pub_key_hash: u8,
    /// Version byte of pay-to-script-hash addresses.
    pub script_hash: u8,
    /// Version byte of WIF private keys.
    pub wif: u8,
}

impl Default for NetworkProfile {
    fn default() -> Self {
        Network::default().profile()
    }
}
