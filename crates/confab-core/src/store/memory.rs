//! In-memory credential store.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::Result;
use crate::tokens::{AccessToken, RefreshToken};

use super::TokenStore;

/// A process-local [`TokenStore`].
///
/// Used by tests and by embedders that keep the session in memory for its
/// lifetime. Cheap to share behind an `Arc`.
pub struct MemoryTokenStore {
    inner: RwLock<StoredTokens>,
}

#[derive(Default)]
struct StoredTokens {
    access: Option<AccessToken>,
    refresh: Option<RefreshToken>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoredTokens::default()),
        }
    }

    /// Create a store pre-seeded with a credential pair.
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(StoredTokens {
                access: Some(AccessToken::new(access)),
                refresh: Some(RefreshToken::new(refresh)),
            }),
        }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> Option<AccessToken> {
        self.inner.read().unwrap().access.clone()
    }

    async fn refresh_token(&self) -> Option<RefreshToken> {
        self.inner.read().unwrap().refresh.clone()
    }

    async fn store_access_token(&self, token: &AccessToken) -> Result<()> {
        self.inner.write().unwrap().access = Some(token.clone());
        Ok(())
    }

    async fn store_token_pair(
        &self,
        access: &AccessToken,
        refresh: &RefreshToken,
    ) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.access = Some(access.clone());
        inner.refresh = Some(refresh.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.inner.write().unwrap() = StoredTokens::default();
        Ok(())
    }
}

impl std::fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTokenStore")
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let store = MemoryTokenStore::new();
        assert!(store.access_token().await.is_none());
        assert!(store.refresh_token().await.is_none());
    }

    #[tokio::test]
    async fn stores_and_clears_pair() {
        let store = MemoryTokenStore::new();
        store
            .store_token_pair(&AccessToken::new("a1"), &RefreshToken::new("r1"))
            .await
            .unwrap();
        assert_eq!(store.access_token().await.unwrap().as_str(), "a1");
        assert_eq!(store.refresh_token().await.unwrap().as_str(), "r1");

        store.clear().await.unwrap();
        assert!(store.access_token().await.is_none());
        assert!(store.refresh_token().await.is_none());
    }

    #[tokio::test]
    async fn access_overwrite_keeps_refresh() {
        let store = MemoryTokenStore::with_tokens("a1", "r1");
        store
            .store_access_token(&AccessToken::new("a2"))
            .await
            .unwrap();
        assert_eq!(store.access_token().await.unwrap().as_str(), "a2");
        assert_eq!(store.refresh_token().await.unwrap().as_str(), "r1");
    }
}
