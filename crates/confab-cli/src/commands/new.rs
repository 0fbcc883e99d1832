//! New conversation command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Conversation title
    pub title: Option<String>,
}

pub async fn run(args: NewArgs) -> Result<()> {
    let (client, store) = client_from_session()?;

    let conversation = check_session(&store, client.create_conversation(args.title.as_deref()).await)
        .await
        .context("Failed to create conversation")?;

    output::success(&format!("Created conversation #{}", conversation.id));
    output::field("Title", &conversation.title);

    Ok(())
}
