//! Vault configuration

use secrecy::Secret;
use serde::Deserialize;
use vaultenv_errors::ClientError;

/// Vault client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Vault server address
    pub address: String,

    /// Static client token
    pub token: Option<Secret<String>>,

    /// AppRole role ID, used when no token is set
    pub role_id: Option<String>,

    /// AppRole secret ID
    pub secret_id: Option<Secret<String>>,

    /// Mount path of the AppRole auth method
    pub approle_mount: String,

    /// Enterprise namespace
    pub namespace: Option<String>,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8200";

fn default_approle_mount() -> String {
    "approle".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            token: None,
            role_id: None,
            secret_id: None,
            approle_mount: default_approle_mount(),
            namespace: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// How the client obtains its token.
#[derive(Debug, Clone)]
pub enum VaultAuth {
    Token(Secret<String>),
    AppRole {
        mount: String,
        role_id: String,
        secret_id: Secret<String>,
    },
}

impl VaultConfig {
    /// Pick the auth method. A static token wins over AppRole credentials.
    pub fn auth(&self) -> Result<VaultAuth, ClientError> {
        if let Some(token) = &self.token {
            return Ok(VaultAuth::Token(token.clone()));
        }

        match (&self.role_id, &self.secret_id) {
            (Some(role_id), Some(secret_id)) => Ok(VaultAuth::AppRole {
                mount: self.approle_mount.clone(),
                role_id: role_id.clone(),
                secret_id: secret_id.clone(),
            }),
            (Some(_), None) => Err(ClientError::auth("role_id is set but secret_id is missing")),
            (None, Some(_)) => Err(ClientError::auth("secret_id is set but role_id is missing")),
            (None, None) => Err(ClientError::auth(
                "no Vault credentials: set VAULT_TOKEN or VAULT_ROLE_ID/VAULT_SECRET_ID",
            )),
        }
    }
}

/// Builder for VaultConfig
pub struct VaultConfigBuilder {
    config: VaultConfig,
}

impl VaultConfigBuilder {
    /// Create a new builder with address
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            config: VaultConfig {
                address: address.into(),
                ..Default::default()
            },
        }
    }

    /// Set a static token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(Secret::new(token.into()));
        self
    }

    /// Set AppRole credentials
    pub fn with_approle(mut self, role_id: impl Into<String>, secret_id: impl Into<String>) -> Self {
        self.config.role_id = Some(role_id.into());
        self.config.secret_id = Some(Secret::new(secret_id.into()));
        self
    }

    /// Set AppRole mount path
    pub fn with_approle_mount(mut self, mount: impl Into<String>) -> Self {
        self.config.approle_mount = mount.into();
        self
    }

    /// Set namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = Some(namespace.into());
        self
    }

    /// Set request timeout
    pub fn with_request_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.request_timeout_secs = timeout_secs;
        self
    }

    /// Build the configuration
    pub fn build(self) -> VaultConfig {
        self.config
    }
}
