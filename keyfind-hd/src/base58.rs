//! Base58Check framing shared by addresses, WIF keys and extended keys.

use keyfind_core::hash::checksum;
use zeroize::Zeroizing;

/// Append the 4-byte checksum to `payload` and Base58-encode the result.
pub(crate) fn encode_check(payload: &[u8]) -> String {
    let mut data = Zeroizing::new(Vec::with_capacity(payload.len() + 4));
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    bs58::encode(data.as_slice()).into_string()
}

/// Decode a Base58Check string, returning the payload without its checksum.
///
/// Returns `None` on bad characters, short input or checksum mismatch.
pub(crate) fn decode_check(encoded: &str) -> Option<Zeroizing<Vec<u8>>> {
    let mut data = Zeroizing::new(bs58::decode(encoded).into_vec().ok()?);
    let payload_len = data.len().checked_sub(4)?;
    if data[payload_len..] != checksum(&data[..payload_len]) {
        return None;
    }
    data.truncate(payload_len);
    Some(data)
}
