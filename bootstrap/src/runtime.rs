//! Process runtime setup

use tracing::info;
use vaultenv_config::AppConfig;
use vaultenv_telemetry::{init_tracing, init_tracing_json};

/// Initialize logging from the loaded configuration
pub fn init_runtime(config: &AppConfig) {
    if config.telemetry.json {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    info!(
        vault_address = %config.vault.address,
        concurrency = config.fetch.concurrency,
        "Runtime initialized"
    );
}
