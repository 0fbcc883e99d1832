//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::FileTokenStore;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let store = FileTokenStore::default_location()?;

    let backend = store
        .stored_backend()
        .context("Failed to read session")?
        .context("No active session. Run 'confab login' first.")?;

    output::field("Backend", backend.as_str());
    if let Some(email) = store.stored_email().context("Failed to read session")? {
        output::field("Account", &email);
    }
    if !store.has_credentials() {
        output::note("No access token stored; run 'confab login'.");
    }

    Ok(())
}
