//! Engine instance registry / factory
//!
//! Creates approval engines on demand and keeps an append-only record of
//! every instance it has created. Each engine is owned exclusively by the
//! registry behind its own mutex, so calls against one instance serialize
//! without blocking the others.

use std::sync::Arc;

use conclave_common::{AccountId, Ledger};
use parking_lot::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::engine::ApprovalEngine;
use crate::error::Result;

/// Opaque reference to a registry-owned engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineHandle(usize);

impl EngineHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "engine#{}", self.0)
    }
}

/// Factory and arena for isolated engine instances
///
/// Handles are never removed; `list()` length equals the number of
/// successful `create` calls.
pub struct EngineRegistry {
    engines: RwLock<Vec<Arc<Mutex<ApprovalEngine>>>>,

    /// Ledger collaborator shared with every created engine
    ledger: Arc<dyn Ledger>,
}

impl EngineRegistry {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            engines: RwLock::new(Vec::new()),
            ledger,
        }
    }

    /// Create a new engine instance with its own signer set and quorum
    ///
    /// Validation is delegated to engine construction; its failures
    /// propagate and nothing is registered. Each instance gets a freshly
    /// minted treasury identity, so instances never share ledger state.
    pub fn create(&self, quorum: u32, signers: Vec<AccountId>) -> Result<EngineHandle> {
        let account = Self::mint_treasury_account();
        let engine = ApprovalEngine::new(quorum, signers, account, Arc::clone(&self.ledger))?;

        let mut engines = self.engines.write();
        engines.push(Arc::new(Mutex::new(engine)));
        let handle = EngineHandle(engines.len() - 1);
        info!(%handle, quorum, "engine registered");
        Ok(handle)
    }

    /// Ordered snapshot of every handle created so far
    pub fn list(&self) -> Vec<EngineHandle> {
        (0..self.engines.read().len()).map(EngineHandle).collect()
    }

    /// Resolve a handle to its engine
    pub fn get(&self, handle: EngineHandle) -> Option<Arc<Mutex<ApprovalEngine>>> {
        self.engines.read().get(handle.0).cloned()
    }

    pub fn len(&self) -> usize {
        self.engines.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.read().is_empty()
    }

    fn mint_treasury_account() -> AccountId {
        AccountId::new(format!("conclave:treasury:{}", Uuid::now_v7()))
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.len())
            .finish()
    }
}
