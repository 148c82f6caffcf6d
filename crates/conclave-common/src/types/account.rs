//! Account and asset identities
//!
//! Every party Conclave touches — signers, transfer recipients, engine
//! treasuries — is an [`AccountId`]. Assets held on the external ledger are
//! referenced by [`AssetId`]. Both are opaque strings to the engine; the
//! ledger collaborator decides what they resolve to.

use serde::{Deserialize, Serialize};

/// Reserved null identity, never a valid signer or recipient
const ZERO_ACCOUNT: &str = "0";

/// Opaque account identity
///
/// The engine never interprets the contents beyond equality and the zero
/// sentinel check; hosts may use addresses, DIDs, or any stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Wrap an identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reserved null identity
    pub fn zero() -> Self {
        Self(ZERO_ACCOUNT.to_string())
    }

    /// Whether this is the reserved null identity
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_ACCOUNT
    }

    /// Identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque reference to an asset on the external ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
