//! Conversation listing command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct ChatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ChatsArgs) -> Result<()> {
    let (client, store) = client_from_session()?;

    let conversations = check_session(&store, client.conversations().await)
        .await
        .context("Failed to list conversations")?;

    if conversations.is_empty() {
        output::note("No conversations yet.");
        return Ok(());
    }

    if args.json {
        output::json(&conversations, args.pretty)?;
        return Ok(());
    }

    for conversation in &conversations {
        println!(
            "{}  {}",
            conversation.id.as_str().dimmed(),
            conversation.title
        );
    }

    Ok(())
}
