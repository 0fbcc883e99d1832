//! Logout command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use confab_http::ChatClient;

use crate::output;
use crate::session::FileTokenStore;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    let store = FileTokenStore::default_location()?;

    let Some(backend) = store.stored_backend().context("Failed to read session")? else {
        output::note("No active session.");
        return Ok(());
    };

    let store = Arc::new(store);
    let client = ChatClient::new(backend, store.clone());

    client.logout().await.context("Failed to log out")?;

    output::success("Logged out");
    Ok(())
}
