//! Rename conversation command implementation.

use anyhow::{Context, Result};
use clap::Args;

use confab_core::types::ConversationId;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Conversation id
    pub chat: String,

    /// New title
    pub title: String,
}

pub async fn run(args: RenameArgs) -> Result<()> {
    let id = ConversationId::new(&args.chat).context("Invalid conversation id")?;

    let (client, store) = client_from_session()?;

    check_session(&store, client.rename_conversation(&id, &args.title).await)
        .await
        .context("Failed to rename conversation")?;

    output::success(&format!("Renamed conversation #{}", id));
    Ok(())
}
