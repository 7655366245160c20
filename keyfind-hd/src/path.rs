//! BIP-32 derivation paths.
//!
//! Paths use master-relative notation such as `m/44'/0'/0'/0`, where an
//! apostrophe (or `h`) suffix marks a hardened segment.

use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

/// A child index in a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) index: 0 to 2^31 - 1
    Normal(u32),
    /// Hardened index: displayed as n', stored as n
    Hardened(u32),
}

impl ChildIndex {
    /// The offset for hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Create a normal (non-hardened) child index.
    pub fn normal(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidPathSyntax(format!("index {index} out of range")));
        }
        Ok(Self::Normal(index))
    }

    /// Create a hardened child index.
    pub fn hardened(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidPathSyntax(format!("index {index}' out of range")));
        }
        Ok(Self::Hardened(index))
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Convert to the raw u32 value used in derivation.
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{i}"),
            Self::Hardened(i) => write!(f, "{i}'"),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (digits, hardened) = match s.strip_suffix(|c: char| matches!(c, '\'' | 'h' | 'H')) {
            Some(digits) => (digits, true),
            None => (s, false),
        };

        // `u32::from_str` accepts a leading '+', which is not path syntax.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidPathSyntax(format!("bad segment '{s}'")));
        }
        let index: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidPathSyntax(format!("bad segment '{s}'")))?;

        if hardened {
            Self::hardened(index)
        } else {
            Self::normal(index)
        }
    }
}

/// An ordered sequence of child indices leading away from the master key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// The empty path, `m`.
    pub const fn master() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Parse a master-relative path such as `m/44'/0'/0'/0`.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        let rest = match path.strip_prefix('m') {
            Some("") => return Ok(Self::master()),
            Some(rest) => rest.strip_prefix('/'),
            None => None,
        }
        .ok_or_else(|| Error::InvalidPathSyntax(path.into()))?;

        let indices = rest
            .split('/')
            .map(str::parse)
            .collect::<Result<Vec<ChildIndex>>>()
            .map_err(|_| Error::InvalidPathSyntax(path.into()))?;

        Ok(Self { indices })
    }

    /// Get the child indices in this path.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Get the number of levels in this path.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Check if this path is empty (master key).
    pub fn is_master(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a child index to the path.
    #[must_use]
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
