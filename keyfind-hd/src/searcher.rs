//! Bounded search for the key behind a known address.
//!
//! The search order is fixed: the master key first, then every template in
//! priority order, and within a template child indices ascending from 0.
//! The first match wins.

use keyfind_core::Seed;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::{
    AddressType, ChildIndex, DerivationPath, Error, ExtendedKey, NetworkProfile, PathTemplate,
    Result, decode_address, encode_p2pkh, to_wif,
};

/// Number of child indices tried below each template.
pub const CANDIDATES_PER_TEMPLATE: u32 = 50;

/// Outcome of one search.
#[derive(Debug)]
pub enum SearchResult {
    /// A candidate's address matched the target.
    Found(FoundKey),
    /// Nothing in the search space matched.
    NotFound,
}

impl SearchResult {
    /// Check if the search found a key.
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Get the found key, if any.
    pub const fn found(&self) -> Option<&FoundKey> {
        match self {
            Self::Found(key) => Some(key),
            Self::NotFound => None,
        }
    }
}

/// The key recovered by a successful search.
pub struct FoundKey {
    /// Private key in WIF format (compressed).
    pub private_key_wif: Zeroizing<String>,
    /// Full derivation path of the key.
    pub path: DerivationPath,
    /// Address type that matched.
    pub address_type: AddressType,
    /// The matching address.
    pub address: String,
}

impl core::fmt::Debug for FoundKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FoundKey")
            .field("private_key_wif", &"[REDACTED]")
            .field("path", &self.path)
            .field("address_type", &self.address_type)
            .field("address", &self.address)
            .finish()
    }
}

/// A derived key and its address, checked once against the target.
struct Candidate {
    key: ExtendedKey,
    path: DerivationPath,
    address: String,
}

impl Candidate {
    fn new(key: ExtendedKey, path: DerivationPath, profile: &NetworkProfile) -> Self {
        let address = encode_p2pkh(&key.public_key_bytes(), profile);
        Self { key, path, address }
    }

    fn into_found(self, profile: &NetworkProfile) -> Result<FoundKey> {
        let secret = self.key.private_key_bytes().ok_or(Error::InvalidPrivateKey)?;
        Ok(FoundKey {
            private_key_wif: to_wif(&secret, profile, true)?,
            path: self.path,
            address_type: AddressType::P2pkh,
            address: self.address,
        })
    }
}

/// Searches a mnemonic's key tree for the key behind a P2PKH address.
///
/// A searcher borrows the network profile and owns its parsed templates; it
/// holds no per-search state, so one instance can serve any number of
/// searches, including concurrent ones.
#[derive(Debug)]
pub struct Searcher<'a> {
    profile: &'a NetworkProfile,
    templates: Vec<PathTemplate>,
}

impl<'a> Searcher<'a> {
    /// Create a searcher over the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathSyntax`] if a built-in template fails to
    /// parse.
    pub fn new(profile: &'a NetworkProfile) -> Result<Self> {
        Ok(Self::with_templates(profile, PathTemplate::defaults()?))
    }

    /// Create a searcher over a custom template list, searched in order.
    #[must_use]
    pub const fn with_templates(profile: &'a NetworkProfile, templates: Vec<PathTemplate>) -> Self {
        Self { profile, templates }
    }

    /// Get the network profile.
    pub const fn profile(&self) -> &NetworkProfile {
        self.profile
    }

    /// Get the templates in search order.
    pub fn templates(&self) -> &[PathTemplate] {
        &self.templates
    }

    /// Every candidate path in the order the search visits them.
    pub fn candidate_paths(&self) -> impl Iterator<Item = DerivationPath> + '_ {
        core::iter::once(DerivationPath::master()).chain(self.templates.iter().flat_map(
            |template| (0..CANDIDATES_PER_TEMPLATE).map(move |i| template.candidate_path(i)),
        ))
    }

    /// Validate the inputs and search for the key behind `target`.
    ///
    /// The target address and the mnemonic are both validated before any
    /// key is derived.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidAddress`] / [`Error::UnsupportedAddressType`] for a
    ///   target that is not a P2PKH address of this network
    /// - [`Error::Mnemonic`] for a phrase that fails BIP-39 validation
    /// - [`Error::SeedDerivation`] if the seed yields no valid master key
    pub fn find(
        &self,
        mnemonic: &str,
        passphrase: Option<&str>,
        target: &str,
    ) -> Result<SearchResult> {
        let target = target.trim();
        decode_address(target, self.profile)?;
        let seed = Seed::from_mnemonic(mnemonic, passphrase)?;
        self.search(&seed, target)
    }

    /// Search the key tree of `seed` for `target`.
    ///
    /// `target` is compared verbatim; use [`Searcher::find`] to validate it
    /// first.
    pub fn search(&self, seed: &Seed, target: &str) -> Result<SearchResult> {
        debug!(
            words = seed.word_count(),
            passphrase = seed.has_passphrase(),
            "searching key tree"
        );
        let master = ExtendedKey::from_seed(seed.as_bytes(), self.profile)?;
        self.search_from(&master, target, |template| {
            master
                .derive_path(template.base())
                .and_then(|base| template.derive_chain(&base))
        })
    }

    /// Check the master key, then scan each template below the chain node
    /// that `chain_node` derives for it.
    fn search_from<C>(
        &self,
        master: &ExtendedKey,
        target: &str,
        mut chain_node: C,
    ) -> Result<SearchResult>
    where
        C: FnMut(&PathTemplate) -> Result<ExtendedKey>,
    {
        let candidate = Candidate::new(master.clone(), DerivationPath::master(), self.profile);
        if let Some(found) = self.check(candidate, target)? {
            return Ok(SearchResult::Found(found));
        }

        for template in &self.templates {
            let chain = match chain_node(template) {
                Ok(chain) => chain,
                Err(e) if e.is_candidate_failure() => {
                    warn!(%template, error = %e, "skipping template");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let found = self.scan(template, target, |index| {
                chain.derive_child(ChildIndex::Normal(index))
            })?;
            if let Some(found) = found {
                return Ok(SearchResult::Found(found));
            }
        }

        info!(address = %target, "address not found in common derivation paths");
        Ok(SearchResult::NotFound)
    }

    /// Walk the candidate indices of one template.
    fn scan<F>(&self, template: &PathTemplate, target: &str, mut derive: F) -> Result<Option<FoundKey>>
    where
        F: FnMut(u32) -> Result<ExtendedKey>,
    {
        for index in 0..CANDIDATES_PER_TEMPLATE {
            let key = match derive(index) {
                Ok(key) => key,
                Err(e) if e.is_candidate_failure() => {
                    warn!(path = %template.candidate_path(index), error = %e, "skipping index");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let candidate = Candidate::new(key, template.candidate_path(index), self.profile);
            if let Some(found) = self.check(candidate, target)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn check(&self, candidate: Candidate, target: &str) -> Result<Option<FoundKey>> {
        debug!(path = %candidate.path, address = %candidate.address, "trying candidate");
        if candidate.address != target {
            return Ok(None);
        }

        info!(path = %candidate.path, address = %candidate.address, "found matching key");
        candidate.into_found(self.profile).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::{Network, PathShape, from_wif};

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    // Junkcoin addresses of the test mnemonic, no passphrase.
    const MASTER_ADDRESS: &str = "7cxoUn1j7wh2WLD2cXQp1xB175ZGRn1io8";
    const BIP44_0_ADDRESS: &str = "7nEq2B6WsyPZZk28MAQw2gB4wbSdv6wtk9";
    const BIP44_7_ADDRESS: &str = "7cRayh31DZFXXeJEK8Fg9eGNHAsuB4YkW5";
    const BIP44_49_ADDRESS: &str = "7qd61JHk1jHN3eNz5svDCKtTuYpEu1VKVP";
    const BIP44_50_ADDRESS: &str = "7dpEtH94ineiifHxzWzxQQUZgw2ax73s8P";
    const LEGACY_3_ADDRESS: &str = "7Xgo36YngBhMsmVbcuyAJA1bhvu83e25LM";
    const BASIC_12_ADDRESS: &str = "7jUJSGfhDPJSbARnnn3Au2BNUzSf2T1Z8K";

    fn find(target: &str) -> SearchResult {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        searcher.find(TEST_MNEMONIC, None, target).unwrap()
    }

    fn found_path(result: &SearchResult) -> String {
        result.found().expect("key should be found").path.to_string()
    }

    #[test]
    fn test_master_key_fast_path() {
        let result = find(MASTER_ADDRESS);
        let key = result.found().unwrap();
        assert_eq!(key.path.to_string(), "m");
        assert_eq!(key.address, MASTER_ADDRESS);
        assert_eq!(
            key.private_key_wif.as_str(),
            "NKJskhy3eqKpUC6sW6N98j1gwN8yG6oBZzyrQ9Cm9XZdTbJSQpjg"
        );
    }

    #[test]
    fn test_finds_bip44_first_index() {
        let result = find(BIP44_0_ADDRESS);
        let key = result.found().unwrap();
        assert_eq!(key.path.to_string(), "m/44'/0'/0'/0/0");
        assert_eq!(key.address_type, AddressType::P2pkh);
        assert_eq!(key.address_type.id(), "p2pkh");
        assert_eq!(
            key.private_key_wif.as_str(),
            "NS67jjFZTbQHAknz6DcV3GWMjdafXXgJSCBJagGV2UunfccuZe2R"
        );
    }

    #[test]
    fn test_finds_later_templates() {
        assert_eq!(found_path(&find(BIP44_7_ADDRESS)), "m/44'/0'/0'/0/7");
        assert_eq!(found_path(&find(LEGACY_3_ADDRESS)), "m/0'/0'/0/3");
        assert_eq!(found_path(&find(BASIC_12_ADDRESS)), "m/0/12");
    }

    #[test]
    fn test_candidate_budget_is_fifty_per_template() {
        assert_eq!(found_path(&find(BIP44_49_ADDRESS)), "m/44'/0'/0'/0/49");
        assert!(!find(BIP44_50_ADDRESS).is_found());
    }

    #[test]
    fn test_found_key_imports_back() {
        let profile = Network::Junkcoin.profile();
        let result = find(BIP44_7_ADDRESS);
        let key = result.found().unwrap();

        let (secret, compressed) = from_wif(&key.private_key_wif, &profile).unwrap();
        assert!(compressed);

        let seed = Seed::from_mnemonic(TEST_MNEMONIC, None).unwrap();
        let derived = ExtendedKey::from_seed(seed.as_bytes(), &profile)
            .unwrap()
            .derive_path(&key.path)
            .unwrap();
        assert_eq!(*derived.private_key_bytes().unwrap(), *secret);
    }

    #[test]
    fn test_passphrase_changes_search_space() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();

        let with = searcher
            .find(TEST_MNEMONIC, Some("TREZOR"), "7peMKsQMSF46Nx5wuY1wCtRq8FytviUWC1")
            .unwrap();
        assert_eq!(found_path(&with), "m/44'/0'/0'/0/0");

        let without = searcher
            .find(TEST_MNEMONIC, None, "7peMKsQMSF46Nx5wuY1wCtRq8FytviUWC1")
            .unwrap();
        assert!(!without.is_found());
    }

    #[test]
    fn test_invalid_mnemonic_rejected_before_search() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        let err = searcher.find(bad, None, BIP44_0_ADDRESS).unwrap_err();
        assert!(matches!(err, Error::Mnemonic(_)));
    }

    #[test]
    fn test_target_validated_before_mnemonic() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();

        let err = searcher
            .find(TEST_MNEMONIC, None, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));

        let err = searcher.find("not a mnemonic", None, "").unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }

    #[test]
    fn test_target_whitespace_trimmed() {
        let result = find(&format!("  {BIP44_0_ADDRESS}\n"));
        assert_eq!(found_path(&result), "m/44'/0'/0'/0/0");
    }

    #[test]
    fn test_candidate_path_order() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        let paths: Vec<String> = searcher.candidate_paths().map(|p| p.to_string()).collect();

        assert_eq!(paths.len(), 1 + 4 * CANDIDATES_PER_TEMPLATE as usize);
        assert_eq!(paths[0], "m");
        assert_eq!(paths[1], "m/44'/0'/0'/0/0");
        assert_eq!(paths[50], "m/44'/0'/0'/0/49");
        assert_eq!(paths[51], "m/44'/0'/0'/0/0");
        assert_eq!(paths[101], "m/0'/0'/0/0");
        assert_eq!(paths[151], "m/0/0");
        assert_eq!(paths[200], "m/0/49");
    }

    #[test]
    fn test_scan_stops_at_first_match() {
        // Both templates reach m/0/i through different shapes.
        let profile = Network::Junkcoin.profile();
        let templates = vec![
            PathTemplate::new("first", "m/0", PathShape::ExternalChainExplicit).unwrap(),
            PathTemplate::new("second", "m", PathShape::ImplicitExternalChainThenIndex).unwrap(),
        ];
        let searcher = Searcher::with_templates(&profile, templates);
        let seed = Seed::from_mnemonic(TEST_MNEMONIC, None).unwrap();
        let master = ExtendedKey::from_seed(seed.as_bytes(), &profile).unwrap();
        let chain = master.derive_child(ChildIndex::Normal(0)).unwrap();

        let mut visited = Vec::new();
        let first = &searcher.templates()[0];
        let found = searcher
            .scan(first, BASIC_12_ADDRESS, |index| {
                visited.push(index);
                chain.derive_child(ChildIndex::Normal(index))
            })
            .unwrap()
            .unwrap();
        assert_eq!(found.path.to_string(), "m/0/12");
        assert_eq!(visited, (0..=12).collect::<Vec<_>>());

        let result = searcher.search(&seed, BASIC_12_ADDRESS).unwrap();
        assert_eq!(found_path(&result), "m/0/12");
    }

    #[test]
    fn test_failed_index_is_skipped() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        let seed = Seed::from_mnemonic(TEST_MNEMONIC, None).unwrap();
        let template = &searcher.templates()[0];
        let chain = ExtendedKey::from_seed(seed.as_bytes(), &profile)
            .unwrap()
            .derive_path(&template.chain_path())
            .unwrap();

        let mut visited = Vec::new();
        let found = searcher
            .scan(template, BIP44_7_ADDRESS, |index| {
                visited.push(index);
                if index == 3 {
                    Err(Error::InvalidChildKey)
                } else {
                    chain.derive_child(ChildIndex::Normal(index))
                }
            })
            .unwrap()
            .unwrap();

        assert_eq!(found.path.to_string(), "m/44'/0'/0'/0/7");
        assert_eq!(visited, (0..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_failed_matching_index_exhausts_template() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        let seed = Seed::from_mnemonic(TEST_MNEMONIC, None).unwrap();
        let template = &searcher.templates()[0];
        let chain = ExtendedKey::from_seed(seed.as_bytes(), &profile)
            .unwrap()
            .derive_path(&template.chain_path())
            .unwrap();

        let mut attempts = 0;
        let found = searcher
            .scan(template, BIP44_7_ADDRESS, |index| {
                attempts += 1;
                if index == 7 {
                    Err(Error::HardenedDerivationRequiresPrivateKey)
                } else {
                    chain.derive_child(ChildIndex::Normal(index))
                }
            })
            .unwrap();

        assert!(found.is_none());
        assert_eq!(attempts, CANDIDATES_PER_TEMPLATE);
    }

    #[test]
    fn test_unexpected_error_aborts_scan() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        let template = &searcher.templates()[0];

        let err = searcher
            .scan(template, BIP44_7_ADDRESS, |_| Err(Error::MaxDepthExceeded))
            .unwrap_err();
        assert!(matches!(err, Error::MaxDepthExceeded));
    }

    #[test]
    fn test_failed_template_is_skipped() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        let seed = Seed::from_mnemonic(TEST_MNEMONIC, None).unwrap();
        let master = ExtendedKey::from_seed(seed.as_bytes(), &profile).unwrap();
        let chain_node = |template: &PathTemplate| {
            master
                .derive_path(template.base())
                .and_then(|base| template.derive_chain(&base))
        };

        let mut attempted = Vec::new();
        let result = searcher
            .search_from(&master, BASIC_12_ADDRESS, |template| {
                attempted.push(template.name());
                if template.name() == "bip44" {
                    Err(Error::InvalidChildKey)
                } else {
                    chain_node(template)
                }
            })
            .unwrap();
        assert_eq!(found_path(&result), "m/0/12");
        assert_eq!(attempted, ["bip44", "bip44-account", "legacy", "basic"]);

        // With both BIP-44 shapes unavailable the key is out of reach.
        let result = searcher
            .search_from(&master, BIP44_7_ADDRESS, |template| {
                if template.base().to_string().starts_with("m/44'") {
                    Err(Error::HardenedDerivationRequiresPrivateKey)
                } else {
                    chain_node(template)
                }
            })
            .unwrap();
        assert!(!result.is_found());
    }

    #[test]
    fn test_unexpected_error_aborts_search() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        let seed = Seed::from_mnemonic(TEST_MNEMONIC, None).unwrap();
        let master = ExtendedKey::from_seed(seed.as_bytes(), &profile).unwrap();

        let mut calls = 0;
        let err = searcher
            .search_from(&master, BASIC_12_ADDRESS, |_| {
                calls += 1;
                Err(Error::MaxDepthExceeded)
            })
            .unwrap_err();
        assert!(matches!(err, Error::MaxDepthExceeded));
        assert_eq!(calls, 1);
    }

    /// Counts "trying candidate" events, one per derived key checked.
    #[derive(Clone, Default)]
    struct CandidateEvents(Arc<AtomicUsize>);

    impl CandidateEvents {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for CandidateEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut message = MessageVisitor::default();
            event.record(&mut message);
            if message.0 == "trying candidate" {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[derive(Default)]
    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn core::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    #[test]
    fn test_invalid_mnemonic_derives_nothing() {
        let profile = Network::Junkcoin.profile();
        let searcher = Searcher::new(&profile).unwrap();
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";

        let events = CandidateEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        let (rejected, accepted) = tracing::subscriber::with_default(subscriber, || {
            let rejected = searcher.find(bad, None, BIP44_0_ADDRESS);
            let before = events.count();
            let accepted = searcher.find(TEST_MNEMONIC, None, MASTER_ADDRESS);
            (rejected.map(|_| before), accepted.map(|_| events.count() - before))
        });

        assert!(matches!(rejected, Err(Error::Mnemonic(_))));
        assert_eq!(events.count(), 1);
        // The valid search checks exactly one candidate: the master key.
        assert_eq!(accepted.unwrap(), 1);
    }

    #[test]
    fn test_found_key_debug_redacts_wif() {
        let result = find(BIP44_0_ADDRESS);
        let debug = format!("{result:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("NS67jjFZ"));
    }
}
