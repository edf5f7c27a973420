//! Vault client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tracing::{debug, info};
use vaultenv_errors::ClientError;
use vaultenv_ports::{SecretData, SecretStore};
use vaultrs::client::{VaultClient as VaultRsClient, VaultClientSettingsBuilder};
use vaultrs_login::LoginClient;
use vaultrs_login::engines::approle::AppRoleLogin;

use crate::config::{VaultAuth, VaultConfig};
use crate::error::{map_status, map_vault_error};

/// Vault client answering logical reads
pub struct VaultClient {
    http: reqwest::Client,
    address: String,
    token: Secret<String>,
    namespace: Option<String>,
}

/// Envelope of `GET /v1/{path}`
#[derive(Debug, Deserialize)]
struct LogicalResponse {
    #[serde(default)]
    data: Option<SecretData>,
}

impl VaultClient {
    /// Create an authenticated client.
    ///
    /// A static token is used as-is; AppRole credentials are exchanged for a
    /// token through the configured auth mount.
    pub async fn connect(config: VaultConfig) -> Result<Self, ClientError> {
        info!("Connecting to Vault at {}", config.address);

        let token = match config.auth()? {
            VaultAuth::Token(token) => token,
            VaultAuth::AppRole {
                mount,
                role_id,
                secret_id,
            } => approle_login(&config, &mount, &role_id, &secret_id).await?,
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| map_vault_error(e, "Failed to build HTTP client"))?;

        Ok(Self {
            http,
            address: config.address.trim_end_matches('/').to_string(),
            token,
            namespace: config.namespace,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.address, path.trim_start_matches('/'))
    }
}

async fn approle_login(
    config: &VaultConfig,
    mount: &str,
    role_id: &str,
    secret_id: &Secret<String>,
) -> Result<Secret<String>, ClientError> {
    let mut settings = VaultClientSettingsBuilder::default()
        .address(&config.address)
        .build()
        .map_err(|e| map_vault_error(e, "Failed to build Vault client settings"))?;
    settings.namespace = config.namespace.clone();

    let mut client = VaultRsClient::new(settings)
        .map_err(|e| map_vault_error(e, "Failed to create Vault client"))?;

    info!(mount, "Authenticating with AppRole");
    let login = AppRoleLogin::new(role_id, secret_id.expose_secret());
    client
        .login(mount, &login)
        .await
        .map_err(|e| map_vault_error(e, "AppRole authentication failed"))?;

    info!("Successfully authenticated with Vault");
    Ok(Secret::new(client.settings.token.clone()))
}

#[async_trait]
impl SecretStore for VaultClient {
    async fn read(&self, path: &str) -> Result<Option<SecretData>, ClientError> {
        debug!("Reading secret from path: {}", path);

        let mut request = self
            .http
            .get(self.url(path))
            .header("X-Vault-Token", self.token.expose_secret());
        if let Some(namespace) = &self.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }

        let response = request
            .send()
            .await
            .map_err(|e| map_vault_error(e, &format!("Failed to read secret at path: {}", path)))?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => {
                debug!("No secret at path: {}", path);
                Ok(None)
            }
            status if status.is_success() => {
                let body: LogicalResponse = response.json().await.map_err(|e| {
                    ClientError::decode(format!("Invalid response for path {}: {}", path, e))
                })?;
                debug!("Successfully read secret from path: {}", path);
                Ok(Some(body.data.unwrap_or_default()))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(map_status(status, body))
            }
        }
    }

    fn address(&self) -> &str {
        &self.address
    }
}
