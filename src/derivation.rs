//! Address derivation
//!
//! Maps the settings label and holder identities to record addresses.
//! The ledger never hard-codes addresses; it asks an [`AddressResolver`]
//! supplied by the host.

use sha2::{Digest, Sha256};

use crate::types::{Address, Identity};

/// Seed prefixes used for record addresses
pub mod seeds {
    /// Settings singleton seed
    pub const SETTINGS: &[u8] = b"settings";
}

/// Marker appended to every derivation, as program-derived addresses do
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Host-supplied address resolution
///
/// Must be deterministic and collision-free between the settings address
/// and every account address.
#[cfg_attr(test, mockall::automock)]
pub trait AddressResolver: Send + Sync {
    /// Well-known address of the settings record
    fn settings_address(&self) -> Address;

    /// Address of the account owned by `holder`
    fn account_address(&self, holder: &Identity) -> Address;
}

/// Seed-hashing resolver scoped to a namespace (the ledger program id)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedResolver {
    namespace: [u8; 32],
}

impl SeedResolver {
    pub fn new(namespace: [u8; 32]) -> Self {
        Self { namespace }
    }

    /// Namespace used when no program id is configured
    pub fn default_namespace() -> [u8; 32] {
        Sha256::digest(b"coin-ledger").into()
    }

    pub fn namespace(&self) -> &[u8; 32] {
        &self.namespace
    }

    /// Derive an address from seeds
    ///
    /// Each seed is length-prefixed so `["ab", "c"]` and `["a", "bc"]`
    /// never collide.
    pub fn derive(&self, seeds: &[&[u8]]) -> Address {
        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update((seed.len() as u32).to_le_bytes());
            hasher.update(seed);
        }
        hasher.update(self.namespace);
        hasher.update(PDA_MARKER);
        Address::new(hasher.finalize().into())
    }
}

impl Default for SeedResolver {
    fn default() -> Self {
        Self::new(Self::default_namespace())
    }
}

impl AddressResolver for SeedResolver {
    fn settings_address(&self) -> Address {
        self.derive(&[seeds::SETTINGS])
    }

    fn account_address(&self, holder: &Identity) -> Address {
        self.derive(&[holder.as_ref()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let resolver = SeedResolver::default();
        let holder = Identity::new([9; 32]);

        assert_eq!(
            resolver.account_address(&holder),
            resolver.account_address(&holder)
        );
        assert_eq!(resolver.settings_address(), resolver.settings_address());
    }

    #[test]
    fn test_distinct_holders_get_distinct_addresses() {
        let resolver = SeedResolver::default();
        let a = resolver.account_address(&Identity::new([1; 32]));
        let b = resolver.account_address(&Identity::new([2; 32]));

        assert_ne!(a, b);
        assert_ne!(a, resolver.settings_address());
    }

    #[test]
    fn test_namespace_scopes_addresses() {
        let holder = Identity::new([3; 32]);
        let one = SeedResolver::new([1; 32]);
        let two = SeedResolver::new([2; 32]);

        assert_ne!(one.account_address(&holder), two.account_address(&holder));
        assert_ne!(one.settings_address(), two.settings_address());
    }

    #[test]
    fn test_seed_boundaries_are_unambiguous() {
        let resolver = SeedResolver::default();
        assert_ne!(
            resolver.derive(&[b"ab".as_slice(), b"c".as_slice()]),
            resolver.derive(&[b"a".as_slice(), b"bc".as_slice()])
        );
    }
}
