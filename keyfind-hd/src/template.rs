//! Derivation path templates scanned by the searcher.
//!
//! Each template names a base node and how candidate indices hang off it.
//! The shape is fixed when the template is defined rather than guessed from
//! the path text.

use core::fmt;

use crate::{ChildIndex, DerivationPath, ExtendedKey, Result};

/// Where candidate indices sit relative to a template's base node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathShape {
    /// The base node already is the external chain: `base/i`.
    ExternalChainExplicit,
    /// The external chain is assumed at child 0 of the base: `base/0/i`.
    ImplicitExternalChainThenIndex,
}

/// A base path plus the shape of the candidates below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    name: &'static str,
    base: DerivationPath,
    shape: PathShape,
}

/// The search templates in priority order.
const DEFAULT_TEMPLATES: [(&str, &str, PathShape); 4] = [
    (
        "bip44",
        "m/44'/0'/0'/0",
        PathShape::ExternalChainExplicit,
    ),
    (
        "bip44-account",
        "m/44'/0'/0'",
        PathShape::ImplicitExternalChainThenIndex,
    ),
    (
        "legacy",
        "m/0'/0'",
        PathShape::ImplicitExternalChainThenIndex,
    ),
    ("basic", "m/0", PathShape::ExternalChainExplicit),
];

impl PathTemplate {
    /// Create a template from a path string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPathSyntax`] if `base` does not parse.
    pub fn new(name: &'static str, base: &str, shape: PathShape) -> Result<Self> {
        Ok(Self {
            name,
            base: base.parse()?,
            shape,
        })
    }

    /// The built-in templates, in the order they are searched.
    ///
    /// Parsed once when a searcher is built, so a malformed constant fails
    /// at startup instead of in the middle of a search.
    pub fn defaults() -> Result<Vec<Self>> {
        DEFAULT_TEMPLATES
            .iter()
            .map(|&(name, base, shape)| Self::new(name, base, shape))
            .collect()
    }

    /// Get the template name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get the base path.
    pub const fn base(&self) -> &DerivationPath {
        &self.base
    }

    /// Get the path shape.
    pub const fn shape(&self) -> PathShape {
        self.shape
    }

    /// Path of the node whose direct children are the candidates.
    pub fn chain_path(&self) -> DerivationPath {
        match self.shape {
            PathShape::ExternalChainExplicit => self.base.clone(),
            PathShape::ImplicitExternalChainThenIndex => self.base.child(ChildIndex::Normal(0)),
        }
    }

    /// Full path of candidate `index`.
    pub fn candidate_path(&self, index: u32) -> DerivationPath {
        self.chain_path().child(ChildIndex::Normal(index))
    }

    /// Derive the chain node for this template from an already derived base
    /// node.
    pub fn derive_chain(&self, base_node: &ExtendedKey) -> Result<ExtendedKey> {
        match self.shape {
            PathShape::ExternalChainExplicit => Ok(base_node.clone()),
            PathShape::ImplicitExternalChainThenIndex => {
                base_node.derive_child(ChildIndex::Normal(0))
            }
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_priority_order() {
        let templates = PathTemplate::defaults().unwrap();
        let bases: Vec<String> = templates.iter().map(|t| t.base().to_string()).collect();
        assert_eq!(bases, ["m/44'/0'/0'/0", "m/44'/0'/0'", "m/0'/0'", "m/0"]);
    }

    #[test]
    fn test_basic_template_is_explicit() {
        // "m/0" already ends in the external chain level.
        let templates = PathTemplate::defaults().unwrap();
        assert_eq!(templates[3].shape(), PathShape::ExternalChainExplicit);
        assert_eq!(templates[3].candidate_path(4).to_string(), "m/0/4");
    }

    #[test]
    fn test_candidate_paths_by_shape() {
        let templates = PathTemplate::defaults().unwrap();
        assert_eq!(templates[0].candidate_path(7).to_string(), "m/44'/0'/0'/0/7");
        assert_eq!(templates[1].candidate_path(7).to_string(), "m/44'/0'/0'/0/7");
        assert_eq!(templates[2].candidate_path(7).to_string(), "m/0'/0'/0/7");
    }

    #[test]
    fn test_malformed_template_rejected() {
        assert!(PathTemplate::new("broken", "m/44'/x", PathShape::ExternalChainExplicit).is_err());
    }
}
