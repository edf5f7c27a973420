//! Environment file writer
//!
//! Writes one `NAME=value` line per secret in the given order. Neither side
//! is quoted or escaped, so a value containing a newline corrupts the file.
//! Nothing is rolled back if a write fails midway.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};
use vaultenv_errors::WriteError;

use crate::SecretRef;

/// Write `secrets` to `destination`, creating missing parent directories.
///
/// Returns the number of secrets written.
pub fn write(secrets: &[SecretRef], destination: impl AsRef<Path>) -> Result<usize, WriteError> {
    let destination = destination.as_ref();

    if let Some(dir) = destination.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| WriteError::DirectoryCreateFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(destination).map_err(|source| WriteError::FileCreateFailed {
        path: destination.to_path_buf(),
        source,
    })?;

    let io_err = |source| WriteError::Io {
        path: destination.to_path_buf(),
        source,
    };

    let mut seen = HashSet::new();
    let mut w = BufWriter::new(file);
    for secret in secrets {
        if !seen.insert(secret.name()) {
            warn!(name = secret.name(), "Duplicate output name, later line wins");
        }
        writeln!(w, "{}={}", secret.name(), secret.value()).map_err(io_err)?;
    }
    w.flush().map_err(io_err)?;

    info!(
        count = secrets.len(),
        destination = %destination.display(),
        "Wrote secrets"
    );
    Ok(secrets.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(name: &str, value: &str) -> SecretRef {
        let mut secret = SecretRef::new("secret/test", "key", name);
        secret.resolve(value.to_string());
        secret
    }

    #[test]
    fn test_write_creates_parent_and_formats_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let destination = tmp.path().join("out").join("env.txt");
        let secrets = vec![resolved("DB_PASS", "s3cr3t"), resolved("API_KEY", "abc123")];

        let count = write(&secrets, &destination).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "DB_PASS=s3cr3t\nAPI_KEY=abc123\n"
        );
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let destination = tmp.path().join("env.txt");
        fs::write(&destination, "OLD=value\nOTHER=value\n").unwrap();

        write(&[resolved("NEW", "v")], &destination).unwrap();
        assert_eq!(fs::read_to_string(&destination).unwrap(), "NEW=v\n");
    }

    #[test]
    fn test_write_empty_list() {
        let tmp = tempfile::tempdir().unwrap();
        let destination = tmp.path().join("env.txt");

        assert_eq!(write(&[], &destination).unwrap(), 0);
        assert_eq!(fs::read_to_string(&destination).unwrap(), "");
    }

    #[test]
    fn test_write_keeps_values_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let destination = tmp.path().join("env.txt");

        write(&[resolved("URL", "postgres://u:p@h/db?a=b c")], &destination).unwrap();
        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "URL=postgres://u:p@h/db?a=b c\n"
        );
    }

    #[test]
    fn test_write_duplicate_names_keeps_both_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let destination = tmp.path().join("env.txt");

        write(&[resolved("SAME", "first"), resolved("SAME", "second")], &destination).unwrap();
        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "SAME=first\nSAME=second\n"
        );
    }

    #[test]
    fn test_write_directory_create_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write(&[resolved("A", "b")], blocker.join("env.txt")).unwrap_err();
        assert!(matches!(err, WriteError::DirectoryCreateFailed { .. }));
    }

    #[test]
    fn test_write_file_create_failure() {
        let tmp = tempfile::tempdir().unwrap();

        // Destination is an existing directory.
        let err = write(&[resolved("A", "b")], tmp.path()).unwrap_err();
        assert!(matches!(err, WriteError::FileCreateFailed { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_io_failure_on_full_device() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }

        // Opening succeeds; the buffered flush hits ENOSPC.
        let err = write(&[resolved("A", "b")], full).unwrap_err();
        match err {
            WriteError::Io { path, .. } => assert_eq!(path, full),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
