//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs) -> Result<()> {
    let (client, store) = client_from_session()?;

    output::note("Refreshing access token...");

    check_session(&store, client.refresh().await)
        .await
        .context("Failed to refresh access token")?;

    output::success("Access token refreshed");
    Ok(())
}
