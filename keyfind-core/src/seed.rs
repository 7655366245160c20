//! BIP-39 seed derivation.

use bip39::Mnemonic;
use zeroize::Zeroizing;

use crate::Error;

/// A binary seed derived from a validated BIP-39 mnemonic.
///
/// The seed is the only secret kept around: the phrase itself is dropped as
/// soon as the seed has been stretched out of it. Seed bytes are zeroized
/// when the value is dropped.
pub struct Seed {
    bytes: Zeroizing<[u8; 64]>,
    word_count: usize,
    has_passphrase: bool,
}

impl Seed {
    /// Validate a mnemonic phrase and derive its seed.
    ///
    /// The phrase is checked against the English wordlist and its checksum
    /// before any key stretching happens, so an invalid phrase never costs a
    /// PBKDF2 run.
    ///
    /// # Arguments
    ///
    /// * `phrase` - BIP-39 mnemonic phrase
    /// * `passphrase` - Optional BIP-39 passphrase
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMnemonic`] if the phrase does not validate.
    pub fn from_mnemonic(phrase: &str, passphrase: Option<&str>) -> Result<Self, Error> {
        let mnemonic: Mnemonic = phrase.parse()?;
        let passphrase = passphrase.unwrap_or("");

        Ok(Self {
            bytes: Zeroizing::new(mnemonic.to_seed(passphrase)),
            word_count: mnemonic.word_count(),
            has_passphrase: !passphrase.is_empty(),
        })
    }

    /// Get the raw seed bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }

    /// Get the word count of the mnemonic this seed came from.
    #[inline]
    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Check if a non-empty passphrase was mixed into the seed.
    #[must_use]
    pub const fn has_passphrase(&self) -> bool {
        self.has_passphrase
    }
}

impl core::fmt::Debug for Seed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Seed")
            .field("word_count", &self.word_count)
            .field("has_passphrase", &self.has_passphrase)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
