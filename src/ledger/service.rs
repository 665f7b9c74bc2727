//! Ledger Service
//!
//! Host-side adapter around the pure state machine:
//! resolve addresses → load records → run transition → commit atomically.
//!
//! Mutating operations are serialized by a write lock, so every transition
//! re-validates its preconditions against the latest committed state and
//! concurrent requests on overlapping records cannot lose updates. Reads go
//! straight to the store.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::error::{LedgerError, LedgerResult};
use super::state_machine;
use crate::common::logging::{generate_correlation_id, log_ledger_event, log_security_event};
use crate::derivation::AddressResolver;
use crate::storage::{AccountStore, RecordStore, SettingsStore, StorageError};
use crate::types::{CoinAccount, CoinSettings, Identity};

/// Conservation check over the whole ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Whether the settings record exists
    pub initialized: bool,
    /// Recorded total supply (0 when not initialized)
    pub total_supply: u64,
    /// Sum of every account balance
    pub sum_of_balances: u128,
    /// Number of open accounts
    pub accounts: usize,
}

impl AuditReport {
    /// Total supply equals the sum of all balances
    pub fn is_balanced(&self) -> bool {
        u128::from(self.total_supply) == self.sum_of_balances
    }
}

/// Coin ledger bound to a record store and an address resolver
pub struct Ledger<S: RecordStore> {
    store: S,
    resolver: Arc<dyn AddressResolver>,
    /// Serializes mutating operations
    write_lock: Mutex<()>,
}

impl<S: RecordStore> Ledger<S> {
    pub fn new(store: S, resolver: impl AddressResolver + 'static) -> Self {
        Self::with_resolver(store, Arc::new(resolver))
    }

    pub fn with_resolver(store: S, resolver: Arc<dyn AddressResolver>) -> Self {
        Self {
            store,
            resolver,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn resolver(&self) -> &dyn AddressResolver {
        self.resolver.as_ref()
    }

    fn settings(&self) -> SettingsStore<'_, S> {
        SettingsStore::new(&self.store, self.resolver.as_ref())
    }

    fn accounts(&self) -> AccountStore<'_, S> {
        AccountStore::new(&self.store, self.resolver.as_ref())
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Create the settings singleton with `requester` as mint authority
    pub async fn initialize(&self, requester: Identity) -> LedgerResult<()> {
        let _guard = self.write_lock.lock().await;
        let correlation_id = generate_correlation_id();

        let result = self.apply_initialize(requester).await;
        self.record(
            "initialize",
            &correlation_id,
            serde_json::json!({ "requester": requester }),
            &result,
        );
        result
    }

    async fn apply_initialize(&self, requester: Identity) -> LedgerResult<()> {
        let settings = self.settings();
        let existing = settings.fetch().await?;
        let created = state_machine::initialize(existing.as_ref(), requester)?;

        // A racing create from another host process still resolves to the
        // same error kind.
        settings
            .create(&created)
            .await
            .map_err(|e| duplicate_as(e, LedgerError::AlreadyInitialized))
    }

    /// Open an empty account for `requester`
    pub async fn open_account(&self, requester: Identity) -> LedgerResult<()> {
        let _guard = self.write_lock.lock().await;
        let correlation_id = generate_correlation_id();

        let result = self.apply_open_account(requester).await;
        self.record(
            "open_account",
            &correlation_id,
            serde_json::json!({
                "requester": requester,
                "address": self.resolver.account_address(&requester),
            }),
            &result,
        );
        result
    }

    async fn apply_open_account(&self, requester: Identity) -> LedgerResult<()> {
        let accounts = self.accounts();
        let existing = accounts.fetch(&requester).await?;
        let opened = state_machine::open_account(existing.as_ref(), requester)?;

        accounts
            .create(&requester, &opened)
            .await
            .map_err(|e| duplicate_as(e, LedgerError::AccountAlreadyExists))
    }

    /// Mint `amount` new coins into `target`'s account
    pub async fn mint(&self, caller: Identity, target: Identity, amount: u64) -> LedgerResult<()> {
        let _guard = self.write_lock.lock().await;
        let correlation_id = generate_correlation_id();

        let result = self.apply_mint(&caller, &target, amount).await;
        self.record(
            "mint",
            &correlation_id,
            serde_json::json!({ "caller": caller, "target": target, "amount": amount }),
            &result,
        );
        result
    }

    async fn apply_mint(&self, caller: &Identity, target: &Identity, amount: u64) -> LedgerResult<()> {
        let settings_store = self.settings();
        let accounts = self.accounts();

        let mut settings = settings_store
            .fetch()
            .await?
            .ok_or(LedgerError::NotInitialized)?;
        let mut account = accounts
            .fetch(target)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        state_machine::mint(&mut settings, &mut account, caller, amount)?;

        self.store
            .commit(vec![
                settings_store.stage(&settings)?,
                accounts.stage(target, &account)?,
            ])
            .await?;

        tracing::debug!(
            target: "coin_ledger::ledger",
            holder = %target,
            balance = account.balance,
            total_supply = settings.total_supply,
            "mint committed"
        );
        Ok(())
    }

    /// Move `amount` from `from`'s account to `to`'s account
    ///
    /// `caller` must own the source account.
    pub async fn transfer(
        &self,
        caller: Identity,
        from: Identity,
        to: Identity,
        amount: u64,
    ) -> LedgerResult<()> {
        let _guard = self.write_lock.lock().await;
        let correlation_id = generate_correlation_id();

        let result = self.apply_transfer(&caller, &from, &to, amount).await;
        self.record(
            "transfer",
            &correlation_id,
            serde_json::json!({ "caller": caller, "from": from, "to": to, "amount": amount }),
            &result,
        );
        result
    }

    async fn apply_transfer(
        &self,
        caller: &Identity,
        from: &Identity,
        to: &Identity,
        amount: u64,
    ) -> LedgerResult<()> {
        let accounts = self.accounts();

        let mut source = accounts
            .fetch(from)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        if from == to {
            return state_machine::transfer_to_self(&source, caller, amount);
        }

        let mut destination = accounts
            .fetch(to)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        state_machine::transfer(&mut source, &mut destination, caller, amount)?;

        self.store
            .commit(vec![
                accounts.stage(from, &source)?,
                accounts.stage(to, &destination)?,
            ])
            .await?;
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// The settings record, `None` before `initialize`
    pub async fn get_settings(&self) -> LedgerResult<Option<CoinSettings>> {
        Ok(self.settings().fetch().await?)
    }

    /// The holder's account, `None` if it was never opened
    pub async fn get_account(&self, holder: &Identity) -> LedgerResult<Option<CoinAccount>> {
        Ok(self.accounts().fetch(holder).await?)
    }

    /// Current total supply
    pub async fn total_supply(&self) -> LedgerResult<u64> {
        self.get_settings()
            .await?
            .map(|s| s.total_supply)
            .ok_or(LedgerError::NotInitialized)
    }

    /// Compare recorded supply against the sum of all balances
    ///
    /// Holds the write lock so the snapshot is consistent.
    pub async fn audit(&self) -> LedgerResult<AuditReport> {
        let _guard = self.write_lock.lock().await;

        let settings = self.settings().fetch().await?;
        let accounts = self.accounts().scan().await?;
        let sum_of_balances: u128 = accounts
            .iter()
            .map(|(_, account)| u128::from(account.balance))
            .sum();

        let report = AuditReport {
            initialized: settings.is_some(),
            total_supply: settings.map(|s| s.total_supply).unwrap_or(0),
            sum_of_balances,
            accounts: accounts.len(),
        };

        if !report.is_balanced() {
            tracing::error!(
                target: "coin_ledger::audit",
                total_supply = report.total_supply,
                sum_of_balances = %report.sum_of_balances,
                "ledger conservation violated"
            );
        }
        Ok(report)
    }

    fn record(
        &self,
        operation: &str,
        correlation_id: &str,
        details: serde_json::Value,
        result: &LedgerResult<()>,
    ) {
        match result {
            Ok(()) => log_ledger_event(operation, correlation_id, details, None),
            Err(e) => {
                if matches!(e, LedgerError::Unauthorized) {
                    log_security_event(
                        &format!("{}_unauthorized", operation),
                        details.clone(),
                        Some(correlation_id),
                    );
                }
                let message = e.to_string();
                log_ledger_event(
                    operation,
                    correlation_id,
                    details,
                    Some((e.error_code(), message.as_str())),
                );
            }
        }
    }
}

fn duplicate_as(err: StorageError, kind: LedgerError) -> LedgerError {
    match err {
        StorageError::Duplicate(_) => kind,
        other => LedgerError::Storage(other),
    }
}
