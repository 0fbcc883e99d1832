//! Credential storage abstraction.
//!
//! The request executor never touches platform storage directly; it is
//! handed a [`TokenStore`] at construction. This keeps the refresh protocol
//! deterministic under test (swap in [`MemoryTokenStore`]) and lets each
//! frontend decide where tokens live (a file for the CLI, process memory for
//! embedders).

mod memory;

pub use memory::MemoryTokenStore;

use async_trait::async_trait;

use crate::Result;
use crate::tokens::{AccessToken, RefreshToken};

/// Persistent storage for the credential pair.
///
/// # Write discipline
///
/// Only three paths may write: login stores the pair, a successful refresh
/// overwrites the access token, and logout clears. A failed refresh must
/// leave the store untouched so the session layer can decide what to do with
/// the stale credentials.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the current access token, if any.
    async fn access_token(&self) -> Option<AccessToken>;

    /// Returns the current refresh token, if any.
    async fn refresh_token(&self) -> Option<RefreshToken>;

    /// Overwrite the stored access token, leaving the refresh token alone.
    async fn store_access_token(&self, token: &AccessToken) -> Result<()>;

    /// Store a full credential pair (login).
    async fn store_token_pair(
        &self,
        access: &AccessToken,
        refresh: &RefreshToken,
    ) -> Result<()>;

    /// Remove all stored credentials (logout).
    async fn clear(&self) -> Result<()>;
}
