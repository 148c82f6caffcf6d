//! # Conclave Engine
//!
//! Multi-party approval workflow engine. An [`ApprovalEngine`] owns a fixed
//! signer set and a quorum threshold; signers propose operations (asset
//! transfers, quorum updates) and approve them by id, and an operation
//! executes exactly once when distinct approvals reach quorum. The
//! [`EngineRegistry`] factory creates and tracks isolated engine instances.
//!
//! ## Lifecycle
//!
//! - `EngineRegistry::create(quorum, signers)` → [`EngineHandle`]
//! - `ApprovalEngine::propose_transfer(..)` → pending [`Operation`]
//! - `ApprovalEngine::approve_transfer(id)` → tally update, auto-execute on
//!   threshold via the external [`Ledger`](conclave_common::Ledger)
//!
//! ## Guarantees
//!
//! - one approval per signer per operation
//! - exactly-once execution; executed operations are immutable
//! - failed ledger payouts roll back the triggering approval entirely
//! - per-instance state is fully isolated

pub mod engine;
pub mod error;
pub mod operation;
pub mod registry;
pub mod signers;

// Re-export the public surface at crate root
pub use engine::ApprovalEngine;
pub use error::{EngineError, Result};
pub use operation::{Operation, OperationId, OperationKind};
pub use registry::{EngineHandle, EngineRegistry};
pub use signers::SignerSet;
