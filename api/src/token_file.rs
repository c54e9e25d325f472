//! File-backed token store for the CLI.
//!
//! Tokens live in a small JSON file so sessions survive process restarts.
//! Every read goes back to the file, so concurrent processes sharing the
//! path observe each other's refreshes.

use ink_core::{TokenPair, TokenStore, TokenStoreError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read(&self) -> StoredTokens {
        // A missing or corrupt file is the same as no session.
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => StoredTokens::default(),
        }
    }

    fn write(&self, tokens: &StoredTokens) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| TokenStoreError::Persist {
                reason: err.to_string(),
            })?;
        }
        let raw = serde_json::to_string_pretty(tokens).map_err(|err| TokenStoreError::Persist {
            reason: err.to_string(),
        })?;
        fs::write(&self.path, raw).map_err(|err| TokenStoreError::Persist {
            reason: err.to_string(),
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn access(&self) -> Option<String> {
        self.read().access
    }

    fn refresh(&self) -> Option<String> {
        self.read().refresh
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), TokenStoreError> {
        // Partial update: only populated slots overwrite what is on disk.
        let mut stored = self.read();
        if let Some(access) = tokens.access.clone() {
            stored.access = Some(access);
        }
        if let Some(refresh) = tokens.refresh.clone() {
            stored.refresh = Some(refresh);
        }
        self.write(&stored)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TokenStoreError::Persist {
                reason: err.to_string(),
            }),
        }
    }
}
