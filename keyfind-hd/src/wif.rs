//! Wallet Import Format encoding.

use k256::SecretKey;
use zeroize::Zeroizing;

use crate::base58::{decode_check, encode_check};
use crate::{Error, NetworkProfile, Result};

/// Marker byte appended to WIF payloads of keys with compressed public keys.
const COMPRESSED_MARKER: u8 = 0x01;

/// Export a private key as WIF under `profile`.
///
/// The payload is `version || key || [0x01 if compressed]`, Base58Check
/// encoded.
///
/// # Errors
///
/// Returns [`Error::InvalidPrivateKey`] if the scalar is zero or not below
/// the curve order.
pub fn to_wif(
    private_key: &[u8; 32],
    profile: &NetworkProfile,
    compressed: bool,
) -> Result<Zeroizing<String>> {
    SecretKey::from_slice(private_key).map_err(|_| Error::InvalidPrivateKey)?;

    let mut payload = Zeroizing::new([0u8; 34]);
    payload[0] = profile.wif;
    payload[1..33].copy_from_slice(private_key);
    let payload_len = if compressed {
        payload[33] = COMPRESSED_MARKER;
        34
    } else {
        33
    };

    Ok(Zeroizing::new(encode_check(&payload[..payload_len])))
}

/// Import a WIF string under `profile`.
///
/// Returns the raw private key and whether it is flagged as compressed.
pub fn from_wif(wif: &str, profile: &NetworkProfile) -> Result<(Zeroizing<[u8; 32]>, bool)> {
    let payload = decode_check(wif).ok_or(Error::InvalidWif("bad encoding or checksum"))?;

    let compressed = match payload.len() {
        33 => false,
        34 if payload[33] == COMPRESSED_MARKER => true,
        34 => return Err(Error::InvalidWif("invalid compression flag")),
        _ => return Err(Error::InvalidWif("invalid length")),
    };
    if payload[0] != profile.wif {
        return Err(Error::InvalidWif("version byte does not match network"));
    }

    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&payload[1..33]);
    SecretKey::from_slice(key.as_slice()).map_err(|_| Error::InvalidPrivateKey)?;

    Ok((key, compressed))
}
