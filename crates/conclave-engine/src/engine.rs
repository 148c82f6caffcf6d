//! Approval engine
//!
//! One engine instance owns a fixed signer set, a mutable quorum threshold,
//! and the full history of proposed operations. Mutating calls take
//! `&mut self`, so every call is atomic under the host's single-writer
//! discipline: a rejected call leaves no observable change, and re-entry
//! during the ledger payout cannot type-check.

use std::collections::BTreeMap;
use std::sync::Arc;

use conclave_common::{AccountId, AssetId, Ledger};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::error::{EngineError, Result};
use crate::operation::{Operation, OperationId, OperationKind};
use crate::signers::SignerSet;

/// Which half of the unified operation table a call addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KindFilter {
    Transfer,
    QuorumUpdate,
}

impl KindFilter {
    fn matches(self, kind: &OperationKind) -> bool {
        match self {
            KindFilter::Transfer => kind.is_transfer(),
            KindFilter::QuorumUpdate => kind.is_quorum_update(),
        }
    }
}

/// Multi-party approval workflow engine
///
/// Operations execute exactly once, when distinct signer approvals reach the
/// quorum threshold. Completed and pending operations remain queryable
/// forever; ids are never reused.
pub struct ApprovalEngine {
    /// Minimum distinct approvals before an operation executes
    quorum: u32,

    /// Authorized signers, fixed at construction
    signers: SignerSet,

    /// The engine's own treasury identity on the ledger
    account: AccountId,

    /// Highest assigned operation id; ids start at 1
    next_id: u64,

    /// Unified operation table, transfers and quorum updates alike
    operations: BTreeMap<OperationId, Operation>,

    /// External asset ledger the engine pays out through
    ledger: Arc<dyn Ledger>,
}

impl ApprovalEngine {
    /// Create an engine with a fixed signer set and initial quorum
    ///
    /// Fails with [`EngineError::InvalidQuorum`] if the quorum is zero or
    /// exceeds the signer count, or if the signer list contains duplicates
    /// or the null identity.
    pub fn new(
        quorum: u32,
        signers: Vec<AccountId>,
        account: AccountId,
        ledger: Arc<dyn Ledger>,
    ) -> Result<Self> {
        let count = signers.len();
        let signers = SignerSet::new(signers).ok_or(EngineError::InvalidQuorum {
            quorum,
            signers: count,
        })?;
        if quorum == 0 || quorum as usize > signers.len() {
            return Err(EngineError::InvalidQuorum {
                quorum,
                signers: signers.len(),
            });
        }

        info!(quorum, signers = signers.len(), account = %account, "engine created");
        Ok(Self {
            quorum,
            signers,
            account,
            next_id: 0,
            operations: BTreeMap::new(),
            ledger,
        })
    }

    /// Propose an asset transfer out of the engine treasury
    ///
    /// Proposing does not count as an approval; the proposer approves
    /// separately like any other signer.
    #[instrument(skip(self), fields(engine = %self.account))]
    pub fn propose_transfer(
        &mut self,
        proposer: &AccountId,
        amount: Decimal,
        recipient: AccountId,
        asset: AssetId,
    ) -> Result<OperationId> {
        self.authorize(proposer)?;
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidAmount);
        }
        if recipient.is_zero() || recipient == self.account {
            return Err(EngineError::InvalidRecipient);
        }

        let id = self.allocate_id();
        self.operations.insert(
            id,
            Operation::new(
                id,
                OperationKind::Transfer {
                    amount,
                    recipient,
                    asset,
                },
                proposer.clone(),
            ),
        );
        debug!(%id, %amount, "transfer proposed");
        Ok(id)
    }

    /// Approve a pending transfer; executes when the tally reaches quorum
    ///
    /// On execution the ledger is invoked once with the stored amount,
    /// recipient, and asset. A ledger failure unwinds the approval and the
    /// executed flag before surfacing, leaving the operation pending.
    #[instrument(skip(self), fields(engine = %self.account))]
    pub fn approve_transfer(&mut self, signer: &AccountId, id: OperationId) -> Result<()> {
        self.approve(signer, id, KindFilter::Transfer)
    }

    /// Propose replacing the quorum threshold
    #[instrument(skip(self), fields(engine = %self.account))]
    pub fn propose_quorum_update(
        &mut self,
        proposer: &AccountId,
        new_quorum: u32,
    ) -> Result<OperationId> {
        self.authorize(proposer)?;
        if new_quorum == 0 || new_quorum as usize > self.signers.len() {
            return Err(EngineError::InvalidQuorum {
                quorum: new_quorum,
                signers: self.signers.len(),
            });
        }

        let id = self.allocate_id();
        self.operations.insert(
            id,
            Operation::new(
                id,
                OperationKind::QuorumUpdate { new_quorum },
                proposer.clone(),
            ),
        );
        debug!(%id, new_quorum, "quorum update proposed");
        Ok(id)
    }

    /// Approve a pending quorum update; applies it at quorum
    #[instrument(skip(self), fields(engine = %self.account))]
    pub fn approve_quorum_update(&mut self, signer: &AccountId, id: OperationId) -> Result<()> {
        self.approve(signer, id, KindFilter::QuorumUpdate)
    }

    // ---- queries ----

    pub fn quorum(&self) -> u32 {
        self.quorum
    }

    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    /// Number of operations proposed so far (highest assigned id)
    pub fn tx_count(&self) -> u64 {
        self.next_id
    }

    pub fn signers(&self) -> &SignerSet {
        &self.signers
    }

    pub fn is_signer(&self, account: &AccountId) -> bool {
        self.signers.contains(account)
    }

    /// The engine's own treasury identity
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Look up a transfer operation by id
    pub fn get_transfer(&self, id: OperationId) -> Result<&Operation> {
        self.lookup(id, KindFilter::Transfer)
    }

    /// Look up a quorum-update operation by id
    pub fn get_quorum_update(&self, id: OperationId) -> Result<&Operation> {
        self.lookup(id, KindFilter::QuorumUpdate)
    }

    /// Treasury balance on the external ledger
    pub fn treasury_balance(&self, asset: &AssetId) -> Decimal {
        self.ledger.balance_of(asset, &self.account)
    }

    // ---- internals ----

    fn authorize(&self, account: &AccountId) -> Result<()> {
        if !self.signers.contains(account) {
            return Err(EngineError::Unauthorized(account.clone()));
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> OperationId {
        self.next_id += 1;
        OperationId(self.next_id)
    }

    fn lookup(&self, id: OperationId, filter: KindFilter) -> Result<&Operation> {
        let op = self
            .operations
            .get(&id)
            .ok_or(EngineError::InvalidTxId(id))?;
        if !filter.matches(&op.kind) {
            return Err(EngineError::InvalidTxId(id));
        }
        Ok(op)
    }

    /// Shared approve/execute path for both operation kinds
    fn approve(&mut self, signer: &AccountId, id: OperationId, filter: KindFilter) -> Result<()> {
        self.authorize(signer)?;
        if id == OperationId::INVALID || id.0 > self.next_id {
            return Err(EngineError::InvalidTxId(id));
        }

        let quorum = self.quorum;
        let treasury = self.account.clone();
        let ledger = Arc::clone(&self.ledger);

        let op = self
            .operations
            .get_mut(&id)
            .ok_or(EngineError::InvalidTxId(id))?;
        if !filter.matches(&op.kind) {
            return Err(EngineError::InvalidTxId(id));
        }
        if op.executed {
            return Err(EngineError::AlreadyExecuted(id));
        }
        if !op.record_approval(signer.clone()) {
            return Err(EngineError::AlreadySigned {
                id,
                signer: signer.clone(),
            });
        }

        let count = op.approval_count();
        debug!(%id, count, quorum, "approval recorded");
        if count < quorum {
            return Ok(());
        }

        // Threshold reached: mark executed before the external call so the
        // operation can never run twice, then unwind on ledger failure.
        op.executed = true;
        match op.kind.clone() {
            OperationKind::Transfer {
                amount,
                recipient,
                asset,
            } => {
                if let Err(err) = ledger.transfer(&asset, &treasury, &recipient, amount) {
                    op.executed = false;
                    op.revoke_approval(signer);
                    warn!(%id, %err, "transfer rolled back");
                    return Err(EngineError::ExternalTransferFailed(err));
                }
                info!(%id, %amount, recipient = %recipient, "transfer executed");
            }
            OperationKind::QuorumUpdate { new_quorum } => {
                self.quorum = new_quorum;
                info!(%id, new_quorum, "quorum updated");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ApprovalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalEngine")
            .field("account", &self.account)
            .field("quorum", &self.quorum)
            .field("signers", &self.signers.len())
            .field("tx_count", &self.next_id)
            .finish()
    }
}
