//! External ledger collaborator
//!
//! The approval engine never moves value itself. When an operation reaches
//! quorum it asks a [`Ledger`] to perform the payout. Hosts implement this
//! trait over whatever actually holds balances; [`InMemoryLedger`] is the
//! reference backend used in tests and embedded setups.

use dashmap::DashMap;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::account::{AccountId, AssetId};

/// Errors surfaced by a ledger collaborator
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        required: Decimal,
        available: Decimal,
    },

    #[error("transfer amount must be positive")]
    InvalidAmount,

    #[error("ledger rejected transfer: {0}")]
    Rejected(String),
}

/// Asset ledger interface
///
/// Mutations must be atomic per call: a failed transfer leaves both account
/// balances untouched.
pub trait Ledger: Send + Sync {
    /// Move `amount` of `asset` from one account to another
    fn transfer(
        &self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError>;

    /// Current balance of `account` in `asset`, zero if unknown
    fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Decimal;
}

/// Concurrent in-memory ledger
///
/// Balances are keyed by (asset, account). Intended for tests and
/// single-process embedding; a production host would back [`Ledger`] with
/// its real asset store.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: DashMap<(AssetId, AccountId), Decimal>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air, for funding test treasuries
    pub fn mint(&self, asset: &AssetId, account: &AccountId, amount: Decimal) {
        let mut balance = self
            .balances
            .entry((asset.clone(), account.clone()))
            .or_insert(Decimal::ZERO);
        *balance += amount;
    }
}

impl Ledger for InMemoryLedger {
    fn transfer(
        &self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        {
            let mut source = self
                .balances
                .entry((asset.clone(), from.clone()))
                .or_insert(Decimal::ZERO);
            if *source < amount {
                return Err(LedgerError::InsufficientBalance {
                    required: amount,
                    available: *source,
                });
            }
            *source -= amount;
        }

        // Source entry dropped above; taking the destination entry second
        // keeps at most one shard lock held at a time.
        let mut dest = self
            .balances
            .entry((asset.clone(), to.clone()))
            .or_insert(Decimal::ZERO);
        *dest += amount;
        Ok(())
    }

    fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Decimal {
        self.balances
            .get(&(asset.clone(), account.clone()))
            .map(|b| *b)
            .unwrap_or(Decimal::ZERO)
    }
}
