//! vaultenv-adapter-vault - HashiCorp Vault adapter
//!
//! Implements the `SecretStore` port over Vault's logical read API with:
//! - static token or AppRole authentication
//! - optional enterprise namespace
//! - mapping of HTTP and login failures to `ClientError`

pub mod client;
pub mod config;
pub mod error;

pub use client::VaultClient;
pub use config::{VaultAuth, VaultConfig, VaultConfigBuilder};
