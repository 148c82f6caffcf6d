//! Proposed operations and their approval tallies
//!
//! Transfers and quorum updates share one record type with a tagged kind and
//! a single monotonic id space. The per-operation approver set is the source
//! of truth for the tally; `executed` flips one way, after which the record
//! is immutable.

use std::collections::HashSet;

use conclave_common::{AccountId, AssetId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operation identifier
///
/// Ids start at 1; 0 is the reserved invalid-id sentinel and is never
/// assigned. Ids are never reused, even when an execution rolls back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OperationId(pub u64);

impl OperationId {
    /// Reserved sentinel for "no such operation"
    pub const INVALID: OperationId = OperationId(0);
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an operation does when it reaches quorum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OperationKind {
    /// Pay out `amount` of `asset` from the engine treasury to `recipient`
    Transfer {
        amount: Decimal,
        recipient: AccountId,
        asset: AssetId,
    },
    /// Replace the engine's quorum threshold
    QuorumUpdate { new_quorum: u32 },
}

impl OperationKind {
    pub fn is_transfer(&self) -> bool {
        matches!(self, OperationKind::Transfer { .. })
    }

    pub fn is_quorum_update(&self) -> bool {
        matches!(self, OperationKind::QuorumUpdate { .. })
    }
}

/// A proposed, trackable state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    pub kind: OperationKind,

    /// Signer that proposed the operation; not an implicit approver
    pub proposer: AccountId,

    /// Signers that have approved so far
    approvals: HashSet<AccountId>,

    /// One-way flag, set at the instant the tally reaches quorum
    pub executed: bool,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Operation {
    pub fn new(id: OperationId, kind: OperationKind, proposer: AccountId) -> Self {
        Self {
            id,
            kind,
            proposer,
            approvals: HashSet::new(),
            executed: false,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Distinct signers that have approved
    pub fn approval_count(&self) -> u32 {
        self.approvals.len() as u32
    }

    pub fn has_approved(&self, signer: &AccountId) -> bool {
        self.approvals.contains(signer)
    }

    /// Record an approval; returns false if the signer already approved
    pub(crate) fn record_approval(&mut self, signer: AccountId) -> bool {
        self.approvals.insert(signer)
    }

    /// Undo an approval recorded earlier in the same call (ledger rollback)
    pub(crate) fn revoke_approval(&mut self, signer: &AccountId) {
        self.approvals.remove(signer);
    }
}
