//! Signer set
//!
//! Ordered collection of unique signer identities with O(1) membership
//! checks. Membership is fixed at engine construction; only the quorum
//! value changes, via a governance operation.

use std::collections::HashSet;

use conclave_common::AccountId;
use serde::{Deserialize, Serialize};

/// Fixed set of authorized signers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerSet {
    /// Signers in registration order
    members: Vec<AccountId>,

    /// Membership index
    index: HashSet<AccountId>,
}

impl SignerSet {
    /// Build a set from an ordered list of identities
    ///
    /// Returns `None` if the list contains duplicates or the null identity.
    pub fn new(members: Vec<AccountId>) -> Option<Self> {
        let index: HashSet<AccountId> = members.iter().cloned().collect();
        if index.len() != members.len() || index.iter().any(|m| m.is_zero()) {
            return None;
        }
        Some(Self { members, index })
    }

    pub fn contains(&self, account: &AccountId) -> bool {
        self.index.contains(account)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Signers in registration order
    pub fn members(&self) -> &[AccountId] {
        &self.members
    }
}
