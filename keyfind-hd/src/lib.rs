//! BIP-32 key tree derivation and P2PKH address search.
//!
//! Given a mnemonic and a known legacy address, [`Searcher`] re-derives
//! candidate keys along a fixed list of derivation path templates and
//! returns the WIF-encoded private key of the first candidate whose address
//! matches.
//!
//! # Features
//!
//! - `serde`: (De)serialize [`NetworkProfile`] so hosts can load custom
//!   networks from configuration files
//!
//! # Usage
//!
//! ```
//! use keyfind_hd::{Network, SearchResult, Searcher};
//!
//! let profile = Network::Bitcoin.profile();
//! let searcher = Searcher::new(&profile)?;
//! let result = searcher.find(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None,
//!     "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA",
//! )?;
//!
//! if let SearchResult::Found(key) = result {
//!     assert_eq!(key.path.to_string(), "m/44'/0'/0'/0/0");
//! }
//! # Ok::<(), keyfind_hd::Error>(())
//! ```

mod address;
mod base58;
mod error;
mod extended_key;
mod network;
mod path;
mod searcher;
mod template;
mod wif;

pub use address::{AddressType, decode_address, encode_p2pkh};
pub use error::Error;
pub use extended_key::ExtendedKey;
pub use network::{Bip32Versions, Network, NetworkProfile, ParseNetworkError};
pub use path::{ChildIndex, DerivationPath};
pub use searcher::{CANDIDATES_PER_TEMPLATE, FoundKey, SearchResult, Searcher};
pub use template::{PathShape, PathTemplate};
pub use wif::{from_wif, to_wif};

/// A convenient Result type alias for keyfind-hd operations.
pub type Result<T> = core::result::Result<T, Error>;
