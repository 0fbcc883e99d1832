//! Conversation files command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use confab_core::types::ConversationId;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Conversation id
    pub chat: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: FilesArgs) -> Result<()> {
    let id = ConversationId::new(&args.chat).context("Invalid conversation id")?;

    let (client, store) = client_from_session()?;

    let files = check_session(&store, client.files(&id).await)
        .await
        .context("Failed to list conversation files")?;

    if files.is_empty() {
        output::note("No files attached to this conversation.");
        return Ok(());
    }

    if args.json {
        output::json(&files, true)?;
        return Ok(());
    }

    for file in &files {
        match &file.url {
            Some(url) => println!("{}  {}", file.name, url.dimmed()),
            None => println!("{}", file.name),
        }
    }

    Ok(())
}
