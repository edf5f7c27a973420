//! vaultenv - resolve Vault secrets into an env file
//!
//! ```bash
//! export VAULT_ADDR=https://vault.internal:8200
//! export VAULT_TOKEN=...
//! vaultenv --secrets "secret/db#password#DB_PASS, secret/data/api#key#API_KEY" \
//!          --output /run/secrets/app.env
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use vaultenv_bootstrap::{init_runtime, run};
use vaultenv_config::{AppConfig, ConfigOverrides};
use vaultenv_errors::AppError;

/// Resolve Vault secret references and write them as KEY=VALUE lines.
///
/// Credentials are read from VAULT_TOKEN, or VAULT_ROLE_ID and
/// VAULT_SECRET_ID for AppRole login. Every flag can also be set in the
/// config file or through VAULTENV_* variables.
#[derive(Parser, Debug)]
#[command(name = "vaultenv", version, about, long_about = None)]
struct Cli {
    /// Comma-separated `path#key#name` entries
    #[arg(short, long, env = "VAULTENV_SECRETS")]
    secrets: Option<String>,

    /// Destination env file
    #[arg(short, long, env = "VAULTENV_OUTPUT")]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vault server address
    #[arg(long, env = "VAULT_ADDR")]
    vault_addr: Option<String>,

    /// Vault namespace
    #[arg(long, env = "VAULT_NAMESPACE")]
    vault_namespace: Option<String>,

    /// Maximum concurrent reads; 1 fetches in spec order
    #[arg(long)]
    concurrency: Option<usize>,

    /// Log level or filter directives
    #[arg(long)]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config,
            secrets: self.secrets,
            output: self.output,
            vault_address: self.vault_addr,
            vault_namespace: self.vault_namespace,
            concurrency: self.concurrency,
            log_level: self.log_level,
            log_json: self.log_json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is not up yet, so config errors go straight to stderr.
    let config = match AppConfig::load_with(&cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            let err = AppError::from(e);
            eprintln!("vaultenv: {}", err);
            return exit_code(&err);
        }
    };

    init_runtime(&config);

    match run(&config).await {
        Ok(summary) => {
            info!(
                written = summary.written,
                destination = %summary.destination.display(),
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "vaultenv failed");
            exit_code(&err)
        }
    }
}

fn exit_code(err: &AppError) -> ExitCode {
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}
