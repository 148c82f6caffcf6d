//! # Conclave Common
//!
//! Shared types and the external-ledger interface for the Conclave approval
//! workflow engine.
//!
//! ## Core Types
//!
//! - [`AccountId`]: opaque identity for signers, recipients, and treasuries
//! - [`AssetId`]: opaque reference to an asset tracked by an external ledger
//!
//! ## Ledger
//!
//! - [`ledger::Ledger`]: the collaborator interface the engine pays out
//!   through — Conclave is a client of this trait, never its implementer
//! - [`ledger::InMemoryLedger`]: concurrent reference backend for tests and
//!   embedding

pub mod ledger;
pub mod types;

// Re-export commonly used types at crate root
pub use ledger::{InMemoryLedger, Ledger, LedgerError};
pub use types::account::{AccountId, AssetId};

/// Conclave version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
