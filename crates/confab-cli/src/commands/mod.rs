//! Command implementations.

pub mod chats;
pub mod files;
pub mod history;
pub mod login;
pub mod logout;
pub mod new;
pub mod refresh;
pub mod rename;
pub mod rm;
pub mod send;
pub mod signup;
pub mod upload;
pub mod whoami;

use std::sync::Arc;

use anyhow::{Context, Result};

use confab_core::error::{AuthError, Error};
use confab_core::store::TokenStore;
use confab_http::ChatClient;

use crate::output;
use crate::session::FileTokenStore;

/// Restore a client from the stored session.
pub(crate) fn client_from_session() -> Result<(ChatClient, Arc<FileTokenStore>)> {
    let store = FileTokenStore::default_location()?;
    let backend = store
        .stored_backend()
        .context("Failed to read session")?
        .context("No active session. Run 'confab login' first.")?;

    let store = Arc::new(store);
    let client = ChatClient::new(backend, store.clone());
    Ok((client, store))
}

/// Unwrap an operation result, clearing the session when the backend says
/// the credentials are beyond use.
pub(crate) async fn check_session<T>(
    store: &FileTokenStore,
    result: confab_core::Result<T>,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            if matches!(
                err,
                Error::Auth(
                    AuthError::NoRefreshToken
                        | AuthError::RefreshRejected { .. }
                        | AuthError::SessionExpired
                )
            ) {
                let _ = store.clear().await;
                output::error("Session expired. Run 'confab login' to sign in again.");
            }
            Err(err.into())
        }
    }
}
