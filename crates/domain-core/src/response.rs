//! Store response normalization
//!
//! KV v1 mounts return the secret fields directly; KV v2 mounts wrap them
//! in a nested `data` object. The shape is inferred from the presence of a
//! non-null `data` entry, so a KV v1 secret that has its own `data` field
//! is read as KV v2.

use serde_json::Value;
use vaultenv_errors::FetchError;
use vaultenv_ports::SecretData;

/// Name of the KV v2 wrapper field.
pub const NESTED_DATA_KEY: &str = "data";

/// Store data, tagged with the shape it was returned in.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreResponse {
    /// Fields at the top level.
    Flat(SecretData),
    /// Fields under a `data` object.
    Nested(SecretData),
}

impl StoreResponse {
    /// Classify raw data read from `path`.
    ///
    /// A non-null `data` entry that is not an object fails with
    /// [`FetchError::TypeMismatch`].
    pub fn from_data(path: &str, mut data: SecretData) -> Result<Self, FetchError> {
        match data.remove(NESTED_DATA_KEY) {
            None | Some(Value::Null) => Ok(Self::Flat(data)),
            Some(Value::Object(nested)) => Ok(Self::Nested(nested)),
            Some(other) => Err(FetchError::TypeMismatch {
                path: path.to_string(),
                key: NESTED_DATA_KEY.to_string(),
                found: json_type(&other).to_string(),
            }),
        }
    }

    /// The mapping that holds the secret fields.
    pub fn fields(&self) -> &SecretData {
        match self {
            Self::Flat(fields) | Self::Nested(fields) => fields,
        }
    }

    /// Extract `key` as a string.
    pub fn string_field(&self, path: &str, key: &str) -> Result<String, FetchError> {
        match self.fields().get(key) {
            None => Err(FetchError::KeyNotFound {
                path: path.to_string(),
                key: key.to_string(),
            }),
            Some(Value::String(value)) => Ok(value.clone()),
            Some(other) => Err(FetchError::TypeMismatch {
                path: path.to_string(),
                key: key.to_string(),
                found: json_type(other).to_string(),
            }),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
