//! Error mapping for the Vault adapter

use reqwest::StatusCode;
use vaultenv_errors::ClientError;

/// Convert a login error from vaultrs into a ClientError.
pub fn map_vault_error(err: impl std::fmt::Display, context: &str) -> ClientError {
    let err_str = err.to_string();
    let lower = err_str.to_lowercase();

    if lower.contains("403") || lower.contains("permission denied") {
        ClientError::permission_denied(format!("{}: {}", context, err_str))
    } else if lower.contains("400") || lower.contains("401") || lower.contains("invalid") {
        ClientError::auth(format!("{}: {}", context, err_str))
    } else {
        // Connection, timeout and everything else
        ClientError::transport(format!("{}: {}", context, err_str))
    }
}

/// Convert a non-success HTTP status from a logical read.
pub fn map_status(status: StatusCode, body: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ClientError::permission_denied(format!("{}: {}", status, body.trim()))
        }
        _ => ClientError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_403_error() {
        let err = map_vault_error("403 permission denied", "AppRole login");
        assert!(matches!(err, ClientError::PermissionDenied(_)));
    }

    #[test]
    fn test_map_invalid_credentials() {
        let err = map_vault_error("400 invalid role or secret ID", "AppRole login");
        assert!(matches!(err, ClientError::Auth(_)));
    }

    #[test]
    fn test_map_connection_error() {
        let err = map_vault_error("connection timeout", "Connecting to Vault");
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.to_string().contains("Connecting to Vault"));
    }

    #[test]
    fn test_map_status() {
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, "{\"errors\":[\"permission denied\"]}".to_string()),
            ClientError::PermissionDenied(_)
        ));
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
            ClientError::Status { status: 500, .. }
        ));
    }
}
