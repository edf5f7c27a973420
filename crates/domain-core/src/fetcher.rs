//! Secret fetcher
//!
//! Resolves secret references against a [`SecretStore`]. Batches are
//! fail-fast: the first failure aborts the batch and is returned as-is.

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, warn};
use vaultenv_errors::FetchError;
use vaultenv_ports::SecretStore;

use crate::{SecretRef, StoreResponse};

/// Look up the value for `secret` without touching it.
pub async fn resolve(secret: &SecretRef, store: &dyn SecretStore) -> Result<String, FetchError> {
    debug!(path = secret.path(), key = secret.key(), "Fetching secret");

    let data = match store.read(secret.path()).await {
        Ok(Some(data)) => data,
        Ok(None) => {
            warn!(path = secret.path(), "No entry found");
            return Err(FetchError::PathNotFound {
                path: secret.path().to_string(),
            });
        }
        Err(source) => {
            debug!(
                secret = %secret,
                address = store.address(),
                error = %source,
                "Failed to fetch secret"
            );
            return Err(FetchError::ClientFailure {
                path: secret.path().to_string(),
                source,
            });
        }
    };

    let response = StoreResponse::from_data(secret.path(), data)?;
    debug!(
        path = secret.path(),
        entries = response.fields().len(),
        nested = matches!(response, StoreResponse::Nested(_)),
        "Found entries"
    );

    response
        .string_field(secret.path(), secret.key())
        .inspect_err(|err| {
            if let FetchError::KeyNotFound { .. } = err {
                warn!(path = secret.path(), key = secret.key(), "No entry found for key");
            }
        })
}

/// Resolve `secret` in place.
pub async fn fetch(secret: &mut SecretRef, store: &dyn SecretStore) -> Result<(), FetchError> {
    let value = resolve(secret, store).await?;
    secret.resolve(value);
    info!(secret = %secret, "Got secret");
    Ok(())
}

/// Resolve every reference, stopping at the first failure.
///
/// With `concurrency <= 1` references are fetched one by one in order and
/// those after a failure stay unresolved. With a higher value up to
/// `concurrency` reads run at once; on failure the remaining in-flight reads
/// are dropped and no reference is resolved.
pub async fn fetch_all(
    secrets: &mut [SecretRef],
    store: &dyn SecretStore,
    concurrency: usize,
) -> Result<(), FetchError> {
    if concurrency <= 1 {
        for secret in secrets.iter_mut() {
            fetch(secret, store).await?;
        }
        return Ok(());
    }

    let values: Vec<String> = stream::iter(secrets.iter())
        .map(|secret| resolve(secret, store))
        .buffered(concurrency)
        .try_collect()
        .await?;

    for (secret, value) in secrets.iter_mut().zip(values) {
        secret.resolve(value);
        info!(secret = %secret, "Got secret");
    }
    Ok(())
}
