//! File-backed key-value storage.
//!
//! One file per key under a data directory (`~/.fleet` by default). The
//! directory is created `0700` and each entry written `0600` on unix, since
//! entries hold bearer tokens.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStorage, StoreResult};
use crate::error::SessionError;

const ENTRY_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(SessionError::Storage(format!("invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.{ENTRY_EXTENSION}")))
    }

    fn ensure_dir(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SessionError::Storage(format!("mkdir {}: {e}", self.dir.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Storage(format!(
                "read {}: {e}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.entry_path(key)?;
        self.ensure_dir()?;

        // Write-then-rename so a crash never leaves a half-written entry.
        let tmp = path.with_extension(format!("{ENTRY_EXTENSION}.tmp"));
        fs::write(&tmp, value)
            .map_err(|e| SessionError::Storage(format!("write {}: {e}", tmp.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
                .map_err(|e| SessionError::Storage(format!("chmod {}: {e}", tmp.display())))?;
        }

        fs::rename(&tmp, &path).map_err(|e| {
            SessionError::Storage(format!("rename {} -> {}: {e}", tmp.display(), path.display()))
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(format!(
                "failed to delete {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_remove_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path().join("fleet"));

        assert_eq!(storage.read("impersonation").unwrap(), None);

        storage.write("impersonation", r#"{"a":1}"#).unwrap();
        assert_eq!(
            storage.read("impersonation").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert!(tmp.path().join("fleet/impersonation.json").exists());

        storage.remove("impersonation").unwrap();
        assert_eq!(storage.read("impersonation").unwrap(), None);
        assert!(!tmp.path().join("fleet/impersonation.json").exists());
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());
        storage.remove("never-written").expect("absent key");
    }

    #[test]
    fn rejects_path_like_keys() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                storage.write(key, "x").is_err(),
                "key {key:?} should be rejected"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn entries_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let dir = tmp.path().join("fleet");
        let storage = FileStorage::new(&dir);
        storage.write("credentials", "secret").unwrap();

        let file_mode = fs::metadata(dir.join("credentials.json"))
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(file_mode, 0o600, "entry file should be 0600");

        let dir_mode = fs::metadata(&dir).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700, "data dir should be 0700");
    }
}
