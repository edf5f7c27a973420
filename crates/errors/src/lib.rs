//! vaultenv-errors - unified error handling
//!
//! One error enum per pipeline stage, plus `AppError` which aggregates them
//! for the binary and maps each failure class to a process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed secret spec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty secret spec")]
    Empty,

    #[error("Invalid entry {entry:?}: expected path#key#name")]
    InvalidEntry { entry: String },
}

impl ParseError {
    pub fn invalid_entry(entry: impl Into<String>) -> Self {
        Self::InvalidEntry {
            entry: entry.into(),
        }
    }
}

/// Failure reported by a secret store client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failure while resolving a single secret reference.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to read secret ({path}): {source}")]
    ClientFailure {
        path: String,
        #[source]
        source: ClientError,
    },

    #[error("Secret ({path}) not found")]
    PathNotFound { path: String },

    #[error("Secret ({path}#{key}) not found")]
    KeyNotFound { path: String, key: String },

    #[error("Secret ({path}#{key}) is {found}, expected a string")]
    TypeMismatch {
        path: String,
        key: String,
        found: String,
    },
}

impl FetchError {
    /// Store path the failure relates to.
    pub fn path(&self) -> &str {
        match self {
            Self::ClientFailure { path, .. }
            | Self::PathNotFound { path }
            | Self::KeyNotFound { path, .. }
            | Self::TypeMismatch { path, .. } => path,
        }
    }
}

/// Failure while writing the environment file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file {}: {source}", .path.display())]
    FileCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application error
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Client(_) => 4,
            Self::Parse(_) => 3,
            Self::Fetch(_) => 4,
            Self::Write(_) => 5,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
