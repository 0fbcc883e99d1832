//! confab - CLI for a token-authenticated chat backend.
//!
//! This is a thin wrapper over the `confab-http` client, intended for
//! working with a chat backend account from the terminal: conversations,
//! message history, document uploads, and the session lifecycle around them.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Login(args) => commands::login::run(args).await,
        Commands::Signup(args) => commands::signup::run(args).await,
        Commands::Logout(args) => commands::logout::run(args).await,
        Commands::Whoami(args) => commands::whoami::run(args).await,
        Commands::Refresh(args) => commands::refresh::run(args).await,
        Commands::Chats(args) => commands::chats::run(args).await,
        Commands::New(args) => commands::new::run(args).await,
        Commands::Rename(args) => commands::rename::run(args).await,
        Commands::Rm(args) => commands::rm::run(args).await,
        Commands::History(args) => commands::history::run(args).await,
        Commands::Send(args) => commands::send::run(args).await,
        Commands::Upload(args) => commands::upload::run(args).await,
        Commands::Files(args) => commands::files::run(args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
