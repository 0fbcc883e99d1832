//! Send message command implementation.

use anyhow::{Context, Result};
use clap::Args;

use confab_core::types::ConversationId;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message text
    pub message: String,

    /// Conversation to send into (a new one is created when omitted)
    #[arg(long)]
    pub chat: Option<String>,

    /// Document ids to ground the reply in (repeatable)
    #[arg(long = "document")]
    pub documents: Vec<String>,
}

pub async fn run(args: SendArgs) -> Result<()> {
    let conversation = args
        .chat
        .as_deref()
        .map(ConversationId::new)
        .transpose()
        .context("Invalid conversation id")?;

    let (client, store) = client_from_session()?;

    output::note("Waiting for reply...");

    let reply = check_session(
        &store,
        client
            .send_message(conversation.as_ref(), &args.message, &args.documents)
            .await,
    )
    .await
    .context("Failed to send message")?;

    println!("{}", reply.text);

    if conversation.is_none() {
        println!();
        output::field("Conversation", reply.conversation.as_str());
    }

    Ok(())
}
