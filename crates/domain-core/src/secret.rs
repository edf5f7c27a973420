//! Secret reference value object

use std::fmt;
use std::str::FromStr;

use vaultenv_errors::ParseError;

/// One requested secret: where to read it, which field, and the output name.
///
/// `value` stays empty until a fetch succeeds.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretRef {
    name: String,
    path: String,
    key: String,
    value: String,
}

impl SecretRef {
    pub fn new(path: impl Into<String>, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            key: key.into(),
            value: String::new(),
        }
    }

    /// Output key written to the environment file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store path to query.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Field extracted from the data at `path`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolved value, empty when unresolved.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_resolved(&self) -> bool {
        !self.value.is_empty()
    }

    pub(crate) fn resolve(&mut self, value: String) {
        self.value = value;
    }
}

impl FromStr for SecretRef {
    type Err = ParseError;

    /// Parse a single `path#key#name` entry.
    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let entry = entry.trim();
        let toks: Vec<&str> = entry.split('#').collect();

        match toks.as_slice() {
            [path, key, name] if toks.iter().all(|t| !t.trim().is_empty()) => {
                Ok(SecretRef::new(*path, *key, *name))
            }
            _ => Err(ParseError::invalid_entry(entry)),
        }
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_resolved() { "[...]" } else { "" };
        write!(f, "({}): {} {}={}", self.name, self.path, self.key, shown)
    }
}

// Hand-written so the value never reaches logs.
impl fmt::Debug for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRef")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("key", &self.key)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
