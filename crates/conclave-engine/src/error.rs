//! Error types for the approval engine
//!
//! Every rejected call surfaces its specific cause so callers and tests can
//! assert on the kind, not just on failure. All errors are synchronous and
//! leave the engine unchanged.

use conclave_common::{AccountId, LedgerError};
use thiserror::Error;

use crate::operation::OperationId;

/// Result type alias using EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

/// Approval engine errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("quorum {quorum} invalid for {signers} signers")]
    InvalidQuorum { quorum: u32, signers: usize },

    #[error("account {0} is not a registered signer")]
    Unauthorized(AccountId),

    #[error("invalid tx id: {0}")]
    InvalidTxId(OperationId),

    #[error("operation {0} already executed")]
    AlreadyExecuted(OperationId),

    #[error("signer {signer} already approved operation {id}")]
    AlreadySigned { id: OperationId, signer: AccountId },

    #[error("transfer amount must be positive")]
    InvalidAmount,

    #[error("recipient is the null identity or the engine itself")]
    InvalidRecipient,

    #[error("external transfer failed: {0}")]
    ExternalTransferFailed(#[from] LedgerError),
}
