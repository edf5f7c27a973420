//! vaultenv-bootstrap - pipeline driver
//!
//! Wires configuration, logging, the Vault client and the resolution
//! pipeline together for the binary.

mod runtime;
mod starter;

pub use runtime::*;
pub use starter::*;
