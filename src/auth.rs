//! Credential storage for the token issued on registration.
//!
//! A process-wide slot holds the current token; the file store additionally
//! persists it under the state directory so it survives restarts.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

static ACCESS_TOKEN: Lazy<RwLock<Option<String>>> = Lazy::new(|| RwLock::new(None));

/// Store the process-wide access token
pub fn set_access_token(token: &str) {
    if let Ok(mut slot) = ACCESS_TOKEN.write() {
        *slot = Some(token.to_string());
    }
}

/// Current process-wide access token
pub fn access_token() -> Option<String> {
    ACCESS_TOKEN.read().ok().and_then(|slot| slot.clone())
}

fn clear_access_token() {
    if let Ok(mut slot) = ACCESS_TOKEN.write() {
        *slot = None;
    }
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("failed to access credential file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("credential file {0} is malformed: {1}")]
    Malformed(PathBuf, #[source] serde_json::Error),
}

/// Destination for the issued credential
pub trait CredentialStore: Send + Sync {
    fn set_access_token(&self, token: &str) -> Result<(), CredentialError>;
    fn access_token(&self) -> Option<String>;
    fn clear(&self) -> Result<(), CredentialError>;
}

/// Keeps the token in the process-wide slot only
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryCredentialStore;

impl CredentialStore for MemoryCredentialStore {
    fn set_access_token(&self, token: &str) -> Result<(), CredentialError> {
        set_access_token(token);
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        access_token()
    }

    fn clear(&self) -> Result<(), CredentialError> {
        clear_access_token();
        Ok(())
    }
}

/// On-disk credential record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub token: String,
    pub stored_at: DateTime<Utc>,
}

/// Persists the token as JSON and mirrors it into the process-wide slot
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted credential, if any
    pub fn load(&self) -> Result<Option<StoredCredential>, CredentialError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw =
            fs::read_to_string(&self.path).map_err(|e| CredentialError::Io(self.path.clone(), e))?;
        let stored = serde_json::from_str(&raw)
            .map_err(|e| CredentialError::Malformed(self.path.clone(), e))?;
        Ok(Some(stored))
    }

    /// Load the persisted token into the process-wide slot
    pub fn restore(&self) -> Result<Option<StoredCredential>, CredentialError> {
        let stored = self.load()?;
        if let Some(ref credential) = stored {
            set_access_token(&credential.token);
            debug!(path = %self.path.display(), "restored stored credential");
        }
        Ok(stored)
    }

    fn write(&self, credential: &StoredCredential) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CredentialError::Io(parent.to_path_buf(), e))?;
        }
        let json = serde_json::to_string_pretty(credential)
            .map_err(|e| CredentialError::Malformed(self.path.clone(), e))?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|e| CredentialError::Io(self.path.clone(), e))?;

        // mode() only applies on creation; tighten a pre-existing file too
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| CredentialError::Io(self.path.clone(), e))?;
        }

        file.write_all(json.as_bytes())
            .map_err(|e| CredentialError::Io(self.path.clone(), e))?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    /// The process-wide slot is always updated; a failed disk write is
    /// logged and the token stays valid for this session.
    fn set_access_token(&self, token: &str) -> Result<(), CredentialError> {
        set_access_token(token);
        match self.write(&StoredCredential {
            token: token.to_string(),
            stored_at: Utc::now(),
        }) {
            Ok(()) => info!(path = %self.path.display(), "credential stored"),
            Err(e) => warn!(error = %e, "credential kept for this session only"),
        }
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        access_token().or_else(|| self.load().ok().flatten().map(|c| c.token))
    }

    fn clear(&self) -> Result<(), CredentialError> {
        clear_access_token();
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| CredentialError::Io(self.path.clone(), e))?;
        }
        Ok(())
    }
}

/// Store selected by `credentials.persist`, with any persisted token restored
pub fn credential_store(config: &Config) -> Arc<dyn CredentialStore> {
    if !config.credentials.persist {
        return Arc::new(MemoryCredentialStore);
    }
    let store = FileCredentialStore::new(config.credentials_path());
    if let Err(e) = store.restore() {
        warn!(error = %e, "ignoring unreadable credential file");
    }
    Arc::new(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_persists_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("state/credentials.json"));

        store.set_access_token("T").unwrap();

        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.token, "T");
        assert!(store.path().exists());
    }

    #[test]
    fn test_file_store_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("credentials.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("credentials.json"));
        store.set_access_token("T").unwrap();

        store.clear().unwrap();

        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(path);
        assert!(matches!(store.load(), Err(CredentialError::Malformed(..))));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("credentials.json"));
        store.set_access_token("T").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileCredentialStore::new(&path);
        store.set_access_token("T").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().unwrap().token, "T");
    }

    #[test]
    fn test_unwritable_path_still_keeps_token_for_session() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("state");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = FileCredentialStore::new(blocker.join("credentials.json"));
        store.set_access_token("unwritable-path-token").unwrap();

        assert!(!store.path().exists());
        assert!(access_token().is_some());
    }

    #[test]
    fn test_credential_store_restores_persisted_token() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        FileCredentialStore::new(config.credentials_path())
            .write(&StoredCredential {
                token: "persisted".to_string(),
                stored_at: Utc::now(),
            })
            .unwrap();

        let store = credential_store(&config);
        assert!(store.access_token().is_some());
        assert!(config.credentials_path().exists());
    }
}
