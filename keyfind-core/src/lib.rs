//! Mnemonic validation and seed derivation for keyfind.
//!
//! This crate turns a BIP-39 mnemonic phrase into the 64-byte [`Seed`] that
//! the derivation crate builds its key tree from, and provides the hash
//! primitives shared by address and key encoding.
//!
//! # Example
//!
//! ```
//! use keyfind_core::Seed;
//!
//! let seed = Seed::from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//! )?;
//! assert_eq!(seed.word_count(), 12);
//! # Ok::<(), keyfind_core::Error>(())
//! ```

mod error;
pub mod hash;
mod seed;

pub use error::Error;
pub use seed::Seed;

/// A convenient Result type alias for keyfind-core operations.
pub type Result<T> = core::result::Result<T, Error>;
