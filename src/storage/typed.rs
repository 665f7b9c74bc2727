//! Typed Record Views
//!
//! `SettingsStore` and `AccountStore` sit on top of a byte-level
//! [`RecordStore`], resolving addresses and encoding/decoding records.
//! Data at an address that carries another record type's discriminator is
//! reported as `InvalidData`, never silently reinterpreted.

use super::traits::{RecordStore, RecordWrite, StorageError, StorageResult};
use crate::derivation::AddressResolver;
use crate::types::{Address, CoinAccount, CoinSettings, Identity, Record, RecordError};

fn decode<R: Record>(address: &Address, data: &[u8]) -> StorageResult<R> {
    R::decode(data).map_err(|e| StorageError::InvalidData(format!("{}: {}", address, e)))
}

fn encode<R: Record>(record: &R) -> StorageResult<Vec<u8>> {
    record
        .encode()
        .map_err(|e| StorageError::InvalidData(e.to_string()))
}

fn is_settings(data: &[u8]) -> bool {
    data.starts_with(&CoinSettings::discriminator())
}

/// View of the settings singleton
pub struct SettingsStore<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    address: Address,
}

impl<'a, S: RecordStore + ?Sized> SettingsStore<'a, S> {
    pub fn new(store: &'a S, resolver: &dyn AddressResolver) -> Self {
        Self {
            store,
            address: resolver.settings_address(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Create the settings record (create-if-absent)
    pub async fn create(&self, settings: &CoinSettings) -> StorageResult<()> {
        self.store.create(&self.address, encode(settings)?).await
    }

    pub async fn fetch(&self) -> StorageResult<Option<CoinSettings>> {
        match self.store.fetch(&self.address).await? {
            Some(data) => decode(&self.address, &data).map(Some),
            None => Ok(None),
        }
    }

    /// Stage an overwrite for a later atomic commit
    pub fn stage(&self, settings: &CoinSettings) -> StorageResult<RecordWrite> {
        Ok(RecordWrite::new(self.address, encode(settings)?))
    }
}

/// View of per-holder accounts
pub struct AccountStore<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    resolver: &'a dyn AddressResolver,
}

impl<'a, S: RecordStore + ?Sized> AccountStore<'a, S> {
    pub fn new(store: &'a S, resolver: &'a dyn AddressResolver) -> Self {
        Self { store, resolver }
    }

    pub fn address(&self, holder: &Identity) -> Address {
        self.resolver.account_address(holder)
    }

    /// Create the holder's account (create-if-absent)
    pub async fn create(&self, holder: &Identity, account: &CoinAccount) -> StorageResult<()> {
        self.store.create(&self.address(holder), encode(account)?).await
    }

    pub async fn fetch(&self, holder: &Identity) -> StorageResult<Option<CoinAccount>> {
        let address = self.address(holder);
        match self.store.fetch(&address).await? {
            Some(data) => decode(&address, &data).map(Some),
            None => Ok(None),
        }
    }

    /// Stage an overwrite for a later atomic commit
    pub fn stage(&self, holder: &Identity, account: &CoinAccount) -> StorageResult<RecordWrite> {
        Ok(RecordWrite::new(self.address(holder), encode(account)?))
    }

    /// Every account record in the store
    ///
    /// The settings singleton is skipped; any other record that is not a
    /// well-formed account is an error.
    pub async fn scan(&self) -> StorageResult<Vec<(Address, CoinAccount)>> {
        let mut accounts = Vec::new();
        for (address, data) in self.store.scan().await? {
            match CoinAccount::decode(&data) {
                Ok(account) => accounts.push((address, account)),
                Err(RecordError::DiscriminatorMismatch { .. }) if is_settings(&data) => continue,
                Err(e) => {
                    return Err(StorageError::InvalidData(format!("{}: {}", address, e)));
                }
            }
        }
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::SeedResolver;
    use crate::storage::memory::MemoryRecordStore;

    #[tokio::test]
    async fn test_settings_round_trip() {
        let store = MemoryRecordStore::new();
        let resolver = SeedResolver::default();
        let settings_store = SettingsStore::new(&store, &resolver);

        assert_eq!(settings_store.fetch().await.unwrap(), None);

        let settings = CoinSettings::new(Identity::new([1; 32]));
        settings_store.create(&settings).await.unwrap();

        assert_eq!(settings_store.fetch().await.unwrap(), Some(settings));
        assert_eq!(settings_store.address(), resolver.settings_address());
    }

    #[tokio::test]
    async fn test_account_at_settings_address_is_invalid_data() {
        let store = MemoryRecordStore::new();
        let resolver = SeedResolver::default();

        // Plant account bytes where the settings singleton lives
        let bogus = CoinAccount::new(Identity::new([2; 32])).encode().unwrap();
        store
            .create(&resolver.settings_address(), bogus)
            .await
            .unwrap();

        let result = SettingsStore::new(&store, &resolver).fetch().await;
        assert!(matches!(result, Err(StorageError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_scan_skips_settings() {
        let store = MemoryRecordStore::new();
        let resolver = SeedResolver::default();
        let authority = Identity::new([1; 32]);
        let holder = Identity::new([2; 32]);

        SettingsStore::new(&store, &resolver)
            .create(&CoinSettings::new(authority))
            .await
            .unwrap();
        let accounts = AccountStore::new(&store, &resolver);
        accounts
            .create(&holder, &CoinAccount::new(holder))
            .await
            .unwrap();

        let scanned = accounts.scan().await.unwrap();
        assert_eq!(scanned.len(), 1);
        assert_eq!(scanned[0].0, resolver.account_address(&holder));
        assert_eq!(scanned[0].1.authority, holder);
    }

    #[tokio::test]
    async fn test_scan_rejects_unknown_record_type() {
        let store = MemoryRecordStore::new();
        let resolver = SeedResolver::default();

        let mut data = CoinAccount::new(Identity::new([6; 32])).encode().unwrap();
        data[..8].copy_from_slice(&crate::types::discriminator("Unknown"));
        store.create(&Address::new([8; 32]), data).await.unwrap();

        let result = AccountStore::new(&store, &resolver).scan().await;
        assert!(matches!(result, Err(StorageError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_scan_rejects_corrupt_account() {
        let store = MemoryRecordStore::new();
        let resolver = SeedResolver::default();

        let mut data = CoinAccount::new(Identity::new([3; 32])).encode().unwrap();
        data.truncate(20);
        store.create(&Address::new([5; 32]), data).await.unwrap();

        let result = AccountStore::new(&store, &resolver).scan().await;
        assert!(matches!(result, Err(StorageError::InvalidData(_))));
    }
}
