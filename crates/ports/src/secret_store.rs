//! Secret store trait

use async_trait::async_trait;
use serde_json::{Map, Value};
use vaultenv_errors::ClientError;

/// Raw data returned by a store read.
pub type SecretData = Map<String, Value>;

/// Read-only access to a key-value secret store.
///
/// Authentication and session setup happen before a store is handed to the
/// pipeline; implementations only answer reads.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read the data stored at `path`.
    ///
    /// Returns `Ok(None)` when the store has no entry at `path`.
    async fn read(&self, path: &str) -> Result<Option<SecretData>, ClientError>;

    /// Address of the backing store, for diagnostics.
    fn address(&self) -> &str;
}
