//! vaultenv-config - configuration loading
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. Vault's conventional variables (`VAULT_ADDR`, `VAULT_TOKEN`, ...)
//! 4. `VAULTENV_*` variables, nested with `__` (`VAULTENV_VAULT__ADDRESS`)
//! 5. command-line overrides

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Toml},
    value::{Uncased, UncasedStr},
};
use serde::Deserialize;
use thiserror::Error;
use vaultenv_errors::AppError;

pub use vaultenv_adapter_vault::VaultConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::config(err.to_string())
    }
}

/// Vault variables read without the `VAULTENV_` prefix.
const VAULT_ENV_KEYS: &[(&str, &str)] = &[
    ("VAULT_ADDR", "vault.address"),
    ("VAULT_TOKEN", "vault.token"),
    ("VAULT_NAMESPACE", "vault.namespace"),
    ("VAULT_ROLE_ID", "vault.role_id"),
    ("VAULT_SECRET_ID", "vault.secret_id"),
];

/// Fetch stage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum reads in flight; 1 fetches sequentially in spec order
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

/// Telemetry settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Emit JSON log lines
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values given on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub secrets: Option<String>,
    pub output: Option<PathBuf>,
    pub vault_address: Option<String>,
    pub vault_namespace: Option<String>,
    pub concurrency: Option<usize>,
    pub log_level: Option<String>,
    pub log_json: bool,
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Secret spec, `path#key#name` entries separated by commas
    pub secrets: Option<String>,
    /// Destination env file
    pub output: Option<PathBuf>,
    pub vault: VaultConfig,
    pub fetch: FetchConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load from the optional file and the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(config_file)?
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load, apply command-line overrides and validate.
    pub fn load_with(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::load(overrides.config_file.as_deref())?;
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new();

        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        let vault_keys: Vec<&str> = VAULT_ENV_KEYS.iter().map(|(env, _)| *env).collect();
        Ok(figment
            .merge(Env::raw().only(&vault_keys).map(vault_env_key))
            .merge(Env::prefixed("VAULTENV_").split("__")))
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(secrets) = &overrides.secrets {
            self.secrets = Some(secrets.clone());
        }
        if let Some(output) = &overrides.output {
            self.output = Some(output.clone());
        }
        if let Some(address) = &overrides.vault_address {
            self.vault.address = address.clone();
        }
        if let Some(namespace) = &overrides.vault_namespace {
            self.vault.namespace = Some(namespace.clone());
        }
        if let Some(concurrency) = overrides.concurrency {
            self.fetch.concurrency = concurrency;
        }
        if let Some(level) = &overrides.log_level {
            self.telemetry.log_level = level.clone();
        }
        if overrides.log_json {
            self.telemetry.json = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // A blank spec is left to the parser, which rejects it.
        if self.secrets.is_none() {
            return Err(ConfigError::Missing("secrets"));
        }
        if self.output.as_ref().is_none_or(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Missing("output"));
        }
        if self.fetch.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "fetch.concurrency must be at least 1".to_string(),
            ));
        }
        self.vault
            .auth()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    /// Secret spec, empty when unset.
    pub fn secrets_spec(&self) -> &str {
        self.secrets.as_deref().unwrap_or_default()
    }
}

fn vault_env_key(key: &UncasedStr) -> Uncased<'_> {
    VAULT_ENV_KEYS
        .iter()
        .find(|(env, _)| key == *env)
        .map(|(_, path)| Uncased::from_borrowed(path))
        .unwrap_or_else(|| Uncased::from_borrowed(key.as_str()))
}
