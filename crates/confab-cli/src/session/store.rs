//! File-backed credential store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use confab_core::error::StoreError;
use confab_core::store::TokenStore;
use confab_core::tokens::{AccessToken, RefreshToken};
use confab_core::types::BackendUrl;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    backend: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// A [`TokenStore`] persisting the session to a JSON file.
///
/// Every read goes back to disk, so a refresh performed by one confab
/// process is visible to the next.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Open the store at the default platform location.
    pub fn default_location() -> Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "confab").context("Could not determine config directory")?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;

        Ok(Self {
            path: data_dir.join("session.json"),
        })
    }

    /// Open the store at an explicit path. Used by tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record the backend URL and account email after a successful login.
    pub fn remember_login(
        &self,
        backend: &BackendUrl,
        email: &str,
    ) -> confab_core::Result<()> {
        let mut session = self.load()?;
        session.backend = Some(backend.to_string());
        session.email = Some(email.to_string());
        self.save(&session)?;
        Ok(())
    }

    /// Returns the backend URL of the stored session, if any.
    pub fn stored_backend(&self) -> confab_core::Result<Option<BackendUrl>> {
        let session = self.load()?;
        match session.backend {
            Some(raw) => Ok(Some(BackendUrl::new(&raw)?)),
            None => Ok(None),
        }
    }

    /// Returns the account email of the stored session, if any.
    pub fn stored_email(&self) -> confab_core::Result<Option<String>> {
        Ok(self.load()?.email)
    }

    /// Returns true if the store currently holds an access token.
    pub fn has_credentials(&self) -> bool {
        self.load().map(|s| s.access_token.is_some()).unwrap_or(false)
    }

    fn load(&self) -> Result<StoredSession, StoreError> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }

        let json = fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            message: e.to_string(),
        })?;
        serde_json::from_str(&json).map_err(|e| StoreError::Read {
            message: e.to_string(),
        })
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(session).map_err(|e| StoreError::Write {
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                message: e.to_string(),
            })?;
        }

        fs::write(&self.path, &json).map_err(|e| StoreError::Write {
            message: e.to_string(),
        })?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(|e| StoreError::Write {
                message: e.to_string(),
            })?;
        }

        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> Option<AccessToken> {
        self.load()
            .ok()
            .and_then(|s| s.access_token)
            .map(AccessToken::new)
    }

    async fn refresh_token(&self) -> Option<RefreshToken> {
        self.load()
            .ok()
            .and_then(|s| s.refresh_token)
            .map(RefreshToken::new)
    }

    async fn store_access_token(&self, token: &AccessToken) -> confab_core::Result<()> {
        let mut session = self.load()?;
        session.access_token = Some(token.as_str().to_string());
        self.save(&session)?;
        Ok(())
    }

    async fn store_token_pair(
        &self,
        access: &AccessToken,
        refresh: &RefreshToken,
    ) -> confab_core::Result<()> {
        let mut session = self.load()?;
        session.access_token = Some(access.as_str().to_string());
        session.refresh_token = Some(refresh.as_str().to_string());
        self.save(&session)?;
        Ok(())
    }

    async fn clear(&self) -> confab_core::Result<()> {
        // Keep the backend URL so the next login defaults to it.
        let mut session = self.load()?;
        session.access_token = None;
        session.refresh_token = None;
        session.email = None;
        self.save(&session)?;
        Ok(())
    }
}

impl std::fmt::Debug for FileTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTokenStore")
            .field("path", &self.path)
            .finish()
    }
}
