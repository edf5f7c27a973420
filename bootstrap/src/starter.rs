//! Pipeline driver
//!
//! One run parses the spec, resolves every reference and writes the env
//! file. Nothing is written unless every secret resolved.

use std::path::{Path, PathBuf};

use tracing::info;
use vaultenv_adapter_vault::VaultClient;
use vaultenv_config::AppConfig;
use vaultenv_domain_core::{SecretRef, fetch_all, parse, write};
use vaultenv_errors::{AppError, AppResult};
use vaultenv_ports::SecretStore;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub destination: PathBuf,
}

/// Run the pipeline against the configured Vault server.
///
/// The spec is parsed and the credentials checked before connecting, so
/// neither mistake reaches the network.
pub async fn run(config: &AppConfig) -> AppResult<RunSummary> {
    let destination = destination(config)?;
    let secrets = parse(config.secrets_spec())?;
    config
        .vault
        .auth()
        .map_err(|e| AppError::config(e.to_string()))?;

    let store = VaultClient::connect(config.vault.clone()).await?;
    resolve_and_write(secrets, &store, config.fetch.concurrency, destination).await
}

/// Run the pipeline against an already-built store.
pub async fn run_with_store(config: &AppConfig, store: &dyn SecretStore) -> AppResult<RunSummary> {
    let destination = destination(config)?;
    let secrets = parse(config.secrets_spec())?;

    resolve_and_write(secrets, store, config.fetch.concurrency, destination).await
}

async fn resolve_and_write(
    mut secrets: Vec<SecretRef>,
    store: &dyn SecretStore,
    concurrency: usize,
    destination: &Path,
) -> AppResult<RunSummary> {
    info!(
        count = secrets.len(),
        address = store.address(),
        "Resolving secrets"
    );
    fetch_all(&mut secrets, store, concurrency).await?;

    let written = write(&secrets, destination)?;
    Ok(RunSummary {
        written,
        destination: destination.to_path_buf(),
    })
}

fn destination(config: &AppConfig) -> AppResult<&Path> {
    config
        .output
        .as_deref()
        .ok_or_else(|| AppError::config("output path is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vaultenv_errors::{FetchError, ParseError};
    use vaultenv_ports::InMemorySecretStore;

    fn config(spec: &str, output: PathBuf) -> AppConfig {
        let mut config = AppConfig::default();
        config.secrets = Some(spec.to_string());
        config.output = Some(output);
        config
    }

    fn store() -> InMemorySecretStore {
        InMemorySecretStore::new()
            .with_entry("secret/db", json!({"password": "s3cr3t"}))
            .with_entry("secret/data/api", json!({"data": {"key": "abc123"}}))
    }

    #[tokio::test]
    async fn test_run_with_store_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("out").join("env.txt");
        let config = config("secret/db#password#DB_PASS, secret/data/api#key#API_KEY", output.clone());

        let summary = run_with_store(&config, &store()).await.unwrap();

        assert_eq!(summary.written, 2);
        assert_eq!(summary.destination, output);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "DB_PASS=s3cr3t\nAPI_KEY=abc123\n"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("env.txt");
        let config = config("secret/db#password#DB_PASS, secret/none#x#X", output.clone());

        let err = run_with_store(&config, &store()).await.unwrap_err();

        assert!(matches!(err, AppError::Fetch(FetchError::PathNotFound { .. })));
        assert_eq!(err.exit_code(), 4);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_parse_failure_reads_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config("secret/db#password", tmp.path().join("env.txt"));
        let store = store();

        let err = run_with_store(&config, &store).await.unwrap_err();

        assert!(matches!(err, AppError::Parse(ParseError::InvalidEntry { .. })));
        assert!(store.reads().is_empty());
    }

    #[tokio::test]
    async fn test_run_rejects_bad_spec_before_connecting() {
        let tmp = tempfile::tempdir().unwrap();
        // No credentials configured either; the spec is checked first.
        let config = config("", tmp.path().join("env.txt"));

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, AppError::Parse(ParseError::Empty)));
    }

    #[tokio::test]
    async fn test_run_without_credentials() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config("secret/db#password#DB_PASS", tmp.path().join("env.txt"));

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("no Vault credentials"));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_missing_output() {
        let mut config = AppConfig::default();
        config.secrets = Some("secret/db#password#DB_PASS".to_string());

        let err = run_with_store(&config, &store()).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
