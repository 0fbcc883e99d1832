//! History command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use confab_core::chat::Role;
use confab_core::types::ConversationId;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Conversation id
    pub chat: String,

    /// Maximum number of messages to return
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of messages to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: HistoryArgs) -> Result<()> {
    let id = ConversationId::new(&args.chat).context("Invalid conversation id")?;

    let (client, store) = client_from_session()?;

    let messages = check_session(&store, client.history(&id, args.limit, args.offset).await)
        .await
        .context("Failed to fetch history")?;

    if messages.is_empty() {
        output::note("No messages in this conversation.");
        return Ok(());
    }

    if args.json {
        output::json(&messages, true)?;
        return Ok(());
    }

    for message in &messages {
        let label = match message.role {
            Role::User => "you".cyan(),
            Role::Assistant => "assistant".green(),
        };
        match &message.timestamp {
            Some(timestamp) => println!("{} {} {}", label, timestamp.dimmed(), message.text),
            None => println!("{} {}", label, message.text),
        }
    }

    Ok(())
}
