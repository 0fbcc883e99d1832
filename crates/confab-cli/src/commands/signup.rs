//! Signup command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use confab_core::Credentials;
use confab_core::store::MemoryTokenStore;
use confab_core::types::BackendUrl;
use confab_http::ChatClient;

use crate::output;

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Backend base URL
    #[arg(long, env = "CONFAB_BACKEND")]
    pub backend: String,
}

pub async fn run(args: SignupArgs) -> Result<()> {
    let backend = BackendUrl::new(&args.backend).context("Invalid backend URL")?;
    let credentials = Credentials::new(&args.email, &args.password);

    output::note("Creating account...");

    // Signup never touches the stored session
    let client = ChatClient::new(backend, Arc::new(MemoryTokenStore::new()));
    let message = client
        .signup(&credentials)
        .await
        .context("Failed to create account")?;

    output::success(message.as_deref().unwrap_or("Account created"));
    output::note("Sign in with 'confab login'.");

    Ok(())
}
