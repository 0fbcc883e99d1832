//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands;

/// Chat backend CLI.
#[derive(Parser, Debug)]
#[command(name = "confab")]
#[command(author, version = env!("CONFAB_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to the chat backend
    Login(commands::login::LoginArgs),

    /// Create a new account
    Signup(commands::signup::SignupArgs),

    /// Log out and clear stored credentials
    Logout(commands::logout::LogoutArgs),

    /// Display the active session
    Whoami(commands::whoami::WhoamiArgs),

    /// Refresh the access token
    Refresh(commands::refresh::RefreshArgs),

    /// List conversations
    Chats(commands::chats::ChatsArgs),

    /// Start a new conversation
    New(commands::new::NewArgs),

    /// Rename a conversation
    Rename(commands::rename::RenameArgs),

    /// Delete a conversation
    Rm(commands::rm::RmArgs),

    /// Show a conversation's message history
    History(commands::history::HistoryArgs),

    /// Send a message and print the reply
    Send(commands::send::SendArgs),

    /// Upload documents into a conversation
    Upload(commands::upload::UploadArgs),

    /// List files attached to a conversation
    Files(commands::files::FilesArgs),
}
