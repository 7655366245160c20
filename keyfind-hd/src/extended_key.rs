//! BIP-32 hierarchical deterministic keys.

use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, SecretKey};
use keyfind_core::hash::hash160;
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::base58::encode_check;
use crate::{Bip32Versions, ChildIndex, DerivationPath, Error, NetworkProfile, Result};

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for master key generation.
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

/// A node in the BIP-32 key tree.
///
/// Holds the compressed public key, the chain code and, unless the node has
/// been neutered, the private scalar. Private material is wiped on drop.
#[derive(Clone)]
pub struct ExtendedKey {
    /// Private scalar; `None` for public-only nodes
    private_key: Option<SecretKey>,
    /// Public key point
    public_key: PublicKey,
    /// Chain code for key derivation
    chain_code: [u8; 32],
    /// Depth in the derivation tree (0 for master)
    depth: u8,
    /// First 4 bytes of hash160 of the parent public key
    parent_fingerprint: [u8; 4],
    /// Child index that produced this key
    child_index: ChildIndex,
    /// Serialization version bytes of the originating network
    versions: Bip32Versions,
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl ExtendedKey {
    /// Create the master key from a seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeedLength`] for seeds outside 16..=64 bytes
    /// and [`Error::SeedDerivation`] if the HMAC output is not a valid
    /// scalar.
    pub fn from_seed(seed: &[u8], profile: &NetworkProfile) -> Result<Self> {
        if !(16..=64).contains(&seed.len()) {
            return Err(Error::InvalidSeedLength(seed.len()));
        }

        let mut mac =
            HmacSha512::new_from_slice(MASTER_KEY_DOMAIN).map_err(|_| Error::SeedDerivation)?;
        mac.update(seed);
        let mut output = Zeroizing::new([0u8; 64]);
        output.copy_from_slice(&mac.finalize().into_bytes());
        let (il, ir) = output.split_at(32);

        let private_key = SecretKey::from_slice(il).map_err(|_| Error::SeedDerivation)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            public_key: private_key.public_key(),
            private_key: Some(private_key),
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: ChildIndex::Normal(0),
            versions: profile.bip32,
        })
    }

    /// Derive the child at `index`.
    ///
    /// Hardened children mix in the private key, normal children the
    /// compressed public key. Public-only nodes can derive normal children.
    ///
    /// # Errors
    ///
    /// - [`Error::HardenedDerivationRequiresPrivateKey`] for a hardened
    ///   index on a public-only node
    /// - [`Error::InvalidChildKey`] when the tweak is not below the curve
    ///   order or the resulting key is zero (the index must be skipped)
    /// - [`Error::MaxDepthExceeded`] below depth 255
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        if self.depth == u8::MAX {
            return Err(Error::MaxDepthExceeded);
        }

        let mut mac =
            HmacSha512::new_from_slice(&self.chain_code).map_err(|_| Error::InvalidChildKey)?;
        match index {
            ChildIndex::Hardened(_) => {
                // Data = 0x00 || ser256(kpar) || ser32(i)
                let parent = self
                    .private_key
                    .as_ref()
                    .ok_or(Error::HardenedDerivationRequiresPrivateKey)?;
                let parent_bytes: Zeroizing<[u8; 32]> = Zeroizing::new(parent.to_bytes().into());
                mac.update(&[0u8]);
                mac.update(parent_bytes.as_slice());
            }
            ChildIndex::Normal(_) => {
                // Data = serP(point(kpar)) || ser32(i)
                mac.update(&self.public_key_bytes());
            }
        }
        mac.update(&index.to_u32().to_be_bytes());
        let mut output = Zeroizing::new([0u8; 64]);
        output.copy_from_slice(&mac.finalize().into_bytes());
        let (il, ir) = output.split_at(32);

        // parse256(IL) must be below n; unlike key construction it is not reduced.
        let tweak: Scalar = Option::from(Scalar::from_repr(*FieldBytes::from_slice(il)))
            .ok_or(Error::InvalidChildKey)?;

        let (private_key, public_key) = match &self.private_key {
            Some(parent) => {
                let child = tweak + parent.to_nonzero_scalar().as_ref();
                let child: NonZeroScalar =
                    Option::from(NonZeroScalar::new(child)).ok_or(Error::InvalidChildKey)?;
                let secret = SecretKey::from(child);
                let public = secret.public_key();
                (Some(secret), public)
            }
            None => {
                let point = ProjectivePoint::GENERATOR * tweak + self.public_key.to_projective();
                let public = PublicKey::from_affine(AffinePoint::from(point))
                    .map_err(|_| Error::InvalidChildKey)?;
                (None, public)
            }
        };

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            private_key,
            public_key,
            chain_code,
            depth: self.depth + 1,
            parent_fingerprint: self.fingerprint(),
            child_index: index,
            versions: self.versions,
        })
    }

    /// Derive the descendant at `path`, one segment at a time.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.indices()
            .iter()
            .try_fold(self.clone(), |node, index| node.derive_child(*index))
    }

    /// Drop the private key, keeping a public-only node.
    #[must_use]
    pub fn neuter(&self) -> Self {
        let mut node = self.clone();
        node.private_key = None;
        node
    }

    /// Raw private key bytes, if this node has them.
    pub fn private_key_bytes(&self) -> Option<Zeroizing<[u8; 32]>> {
        self.private_key
            .as_ref()
            .map(|key| Zeroizing::new(key.to_bytes().into()))
    }

    /// Check if this node carries a private key.
    pub const fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Compressed SEC1 public key (33 bytes).
    pub fn public_key_bytes(&self) -> [u8; 33] {
        let point = self.public_key.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        bytes
    }

    /// First 4 bytes of hash160 of the public key.
    pub fn fingerprint(&self) -> [u8; 4] {
        let hash = hash160(&self.public_key_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Get the chain code.
    pub const fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Get the depth.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the parent fingerprint.
    pub const fn parent_fingerprint(&self) -> &[u8; 4] {
        &self.parent_fingerprint
    }

    /// Get the child index.
    pub const fn child_index(&self) -> ChildIndex {
        self.child_index
    }

    /// Serialize to Base58Check `xprv` form, if this node has a private key.
    pub fn to_xprv(&self) -> Option<Zeroizing<String>> {
        let secret = self.private_key_bytes()?;
        let mut key_data = Zeroizing::new([0u8; 33]);
        key_data[1..].copy_from_slice(secret.as_slice());
        Some(Zeroizing::new(
            self.serialize(self.versions.private, &key_data),
        ))
    }

    /// Serialize to Base58Check `xpub` form.
    pub fn to_xpub(&self) -> String {
        self.serialize(self.versions.public, &self.public_key_bytes())
    }

    fn serialize(&self, version: u32, key_data: &[u8; 33]) -> String {
        let mut data = Zeroizing::new(Vec::with_capacity(78));
        data.extend_from_slice(&version.to_be_bytes());
        data.push(self.depth);
        data.extend_from_slice(&self.parent_fingerprint);
        data.extend_from_slice(&self.child_index.to_u32().to_be_bytes());
        data.extend_from_slice(&self.chain_code);
        data.extend_from_slice(key_data);
        encode_check(&data)
    }
}

impl core::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .field("has_private_key", &self.has_private_key())
            .finish_non_exhaustive()
    }
}
