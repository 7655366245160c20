//! Legacy P2PKH address encoding.

use core::fmt;

use keyfind_core::hash::hash160;

use crate::base58::{decode_check, encode_check};
use crate::{Error, NetworkProfile, Result};

/// Address types the searcher can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum AddressType {
    /// Pay to Public Key Hash (Legacy).
    #[default]
    P2pkh,
}

impl AddressType {
    /// Short identifier used in search results.
    #[inline]
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::P2pkh => "p2pkh",
        }
    }

    /// Get address type name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::P2pkh => "P2PKH (Legacy)",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Encode a compressed public key as a P2PKH address.
///
/// The address is `Base58Check(version || RIPEMD160(SHA256(pubkey)))` with
/// the profile's pub-key-hash version byte.
#[must_use]
pub fn encode_p2pkh(public_key: &[u8; 33], profile: &NetworkProfile) -> String {
    let mut payload = [0u8; 21];
    payload[0] = profile.pub_key_hash;
    payload[1..].copy_from_slice(&hash160(public_key));
    encode_check(&payload)
}

/// Decode and classify an address under `profile`.
///
/// Returns the address type and its 20-byte hash. Script-hash addresses
/// decode fine but are rejected with [`Error::UnsupportedAddressType`],
/// since no single key can be recovered for them.
pub fn decode_address(address: &str, profile: &NetworkProfile) -> Result<(AddressType, [u8; 20])> {
    let payload = decode_check(address).ok_or_else(|| Error::InvalidAddress(address.into()))?;
    if payload.len() != 21 {
        return Err(Error::InvalidAddress(address.into()));
    }

    let version = payload[0];
    if version == profile.script_hash {
        return Err(Error::UnsupportedAddressType(version));
    }
    if version != profile.pub_key_hash {
        return Err(Error::InvalidAddress(address.into()));
    }

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((AddressType::P2pkh, hash))
}
