//! Ledger state transitions
//!
//! Pure functions over mutable record views. Each transition checks all of
//! its preconditions first and only then writes, so a failed call leaves
//! every record untouched. Address resolution, loading and committing are
//! the host's job (see `service`).

use super::error::{LedgerError, LedgerResult};
use crate::types::{CoinAccount, CoinSettings, Identity};

/// Create the settings record for `requester`
///
/// `existing` is whatever currently sits at the settings address.
pub fn initialize(existing: Option<&CoinSettings>, requester: Identity) -> LedgerResult<CoinSettings> {
    if existing.is_some() {
        return Err(LedgerError::AlreadyInitialized);
    }
    Ok(CoinSettings::new(requester))
}

/// Create an empty account owned by `requester`
pub fn open_account(existing: Option<&CoinAccount>, requester: Identity) -> LedgerResult<CoinAccount> {
    if existing.is_some() {
        return Err(LedgerError::AccountAlreadyExists);
    }
    Ok(CoinAccount::new(requester))
}

/// Credit `amount` to `target` and grow total supply by the same amount
pub fn mint(
    settings: &mut CoinSettings,
    target: &mut CoinAccount,
    caller: &Identity,
    amount: u64,
) -> LedgerResult<()> {
    if *caller != settings.authority {
        return Err(LedgerError::Unauthorized);
    }

    let balance = target
        .balance
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;
    let total_supply = settings
        .total_supply
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;

    target.balance = balance;
    settings.total_supply = total_supply;
    Ok(())
}

/// Move `amount` from `from` to `to`; total supply is untouched
pub fn transfer(
    from: &mut CoinAccount,
    to: &mut CoinAccount,
    caller: &Identity,
    amount: u64,
) -> LedgerResult<()> {
    check_transfer_source(from, caller, amount)?;

    let to_balance = to
        .balance
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;

    from.balance -= amount;
    to.balance = to_balance;
    Ok(())
}

/// Validate a transfer whose source and destination are the same account
///
/// Debit and credit cancel, so nothing is written; the source checks still
/// apply.
pub fn transfer_to_self(account: &CoinAccount, caller: &Identity, amount: u64) -> LedgerResult<()> {
    check_transfer_source(account, caller, amount)
}

fn check_transfer_source(from: &CoinAccount, caller: &Identity, amount: u64) -> LedgerResult<()> {
    if *caller != from.authority {
        return Err(LedgerError::Unauthorized);
    }
    if from.balance < amount {
        return Err(LedgerError::InsufficientBalance);
    }
    Ok(())
}
