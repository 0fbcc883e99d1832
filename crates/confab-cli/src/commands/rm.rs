//! Delete conversation command implementation.

use anyhow::{Context, Result};
use clap::Args;

use confab_core::types::ConversationId;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Conversation id
    pub chat: String,
}

pub async fn run(args: RmArgs) -> Result<()> {
    let id = ConversationId::new(&args.chat).context("Invalid conversation id")?;

    let (client, store) = client_from_session()?;

    check_session(&store, client.delete_conversation(&id).await)
        .await
        .context("Failed to delete conversation")?;

    output::success(&format!("Deleted conversation #{}", id));
    Ok(())
}
