//! In-memory secret store

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use vaultenv_errors::ClientError;

use crate::{SecretData, SecretStore};

/// Secret store backed by a map, for local runs and tests.
///
/// Paths registered with [`InMemorySecretStore::fail_on`] return a
/// transport error. Every read is recorded in order.
#[derive(Default)]
pub struct InMemorySecretStore {
    entries: HashMap<String, SecretData>,
    failing: HashSet<String>,
    reads: Mutex<Vec<String>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` at `path`. Non-object values are ignored.
    pub fn with_entry(mut self, path: impl Into<String>, data: Value) -> Self {
        if let Value::Object(map) = data {
            self.entries.insert(path.into(), map);
        }
        self
    }

    /// Make reads of `path` fail at the client level.
    pub fn fail_on(mut self, path: impl Into<String>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Paths read so far, in call order.
    pub fn reads(&self) -> Vec<String> {
        self.reads
            .lock()
            .map(|reads| reads.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn read(&self, path: &str) -> Result<Option<SecretData>, ClientError> {
        if let Ok(mut reads) = self.reads.lock() {
            reads.push(path.to_string());
        }
        debug!(path, "in-memory read");

        if self.failing.contains(path) {
            return Err(ClientError::transport(format!("injected failure for {}", path)));
        }
        Ok(self.entries.get(path).cloned())
    }

    fn address(&self) -> &str {
        "memory://"
    }
}
