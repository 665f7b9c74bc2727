//! Ledger Records
//!
//! The two persistent record types and their on-store layout:
//!
//! ```text
//! [0..8]   discriminator  sha256("account:<Name>")[..8]
//! [8..40]  authority      32-byte identity
//! [40..48] u64 LE         total_supply (settings) / balance (account)
//! ```

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::identity::Identity;

/// Discriminator length in bytes
pub const DISCRIMINATOR_LEN: usize = 8;

/// Record decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record data too short: expected {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("record discriminator mismatch: not a {expected}")]
    DiscriminatorMismatch { expected: &'static str },

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Compute the type discriminator for a record name
pub fn discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let hash = Sha256::digest(format!("account:{}", name).as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    out
}

/// A record type that can live in the store
pub trait Record: BorshSerialize + BorshDeserialize + Sized {
    /// Type name, hashed into the discriminator
    const NAME: &'static str;

    /// Borsh body length (without discriminator)
    const BODY_LEN: usize;

    /// Full encoded length
    const LEN: usize = DISCRIMINATOR_LEN + Self::BODY_LEN;

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        discriminator(Self::NAME)
    }

    /// Encode as discriminator followed by the borsh body
    fn encode(&self) -> Result<Vec<u8>, RecordError> {
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::discriminator());
        borsh::to_writer(&mut data, self).map_err(|e| RecordError::Malformed(e.to_string()))?;
        Ok(data)
    }

    /// Decode, rejecting data that belongs to another record type
    fn decode(data: &[u8]) -> Result<Self, RecordError> {
        if data.len() < Self::LEN {
            return Err(RecordError::TooShort {
                expected: Self::LEN,
                actual: data.len(),
            });
        }
        if data[..DISCRIMINATOR_LEN] != Self::discriminator() {
            return Err(RecordError::DiscriminatorMismatch {
                expected: Self::NAME,
            });
        }
        Self::try_from_slice(&data[DISCRIMINATOR_LEN..Self::LEN])
            .map_err(|e| RecordError::Malformed(e.to_string()))
    }
}

/// Global ledger settings (singleton)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct CoinSettings {
    /// The only identity allowed to mint
    pub authority: Identity,
    /// Sum of all account balances
    pub total_supply: u64,
}

impl CoinSettings {
    pub fn new(authority: Identity) -> Self {
        Self {
            authority,
            total_supply: 0,
        }
    }
}

impl Record for CoinSettings {
    const NAME: &'static str = "CoinSettings";
    const BODY_LEN: usize = 32 + 8;
}

/// Per-holder balance account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct CoinAccount {
    /// Holder allowed to move coins out of this account
    pub authority: Identity,
    pub balance: u64,
}

impl CoinAccount {
    pub fn new(authority: Identity) -> Self {
        Self {
            authority,
            balance: 0,
        }
    }
}

impl Record for CoinAccount {
    const NAME: &'static str = "CoinAccount";
    const BODY_LEN: usize = 32 + 8;
}
