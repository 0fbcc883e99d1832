//! Login command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use confab_core::Credentials;
use confab_core::types::BackendUrl;
use confab_http::ChatClient;

use crate::output;
use crate::session::FileTokenStore;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Backend base URL (defaults to the last one used)
    #[arg(long, env = "CONFAB_BACKEND")]
    pub backend: Option<String>,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let store = FileTokenStore::default_location()?;

    let backend = match &args.backend {
        Some(raw) => BackendUrl::new(raw).context("Invalid backend URL")?,
        None => store
            .stored_backend()
            .context("Failed to read session")?
            .context("No backend URL. Pass --backend or set CONFAB_BACKEND.")?,
    };

    let credentials = Credentials::new(&args.email, &args.password);

    output::note("Logging in...");

    let store = Arc::new(store);
    let client = ChatClient::new(backend.clone(), store.clone());
    let profile = client
        .login(&credentials)
        .await
        .context("Failed to login")?;

    // Save the backend and account alongside the tokens
    store
        .remember_login(&backend, &args.email)
        .context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("Account", &args.email);
    output::field("Backend", backend.as_str());
    if let Some(name) = profile.and_then(|p| p.name) {
        output::field("Name", &name);
    }

    Ok(())
}
