//! Document upload command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use confab_core::chat::DocumentUpload;
use confab_core::types::ConversationId;

use crate::commands::{check_session, client_from_session};
use crate::output;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Conversation id
    pub chat: String,

    /// Files to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Description forwarded to the backend
    #[arg(long)]
    pub description: Option<String>,
}

pub async fn run(args: UploadArgs) -> Result<()> {
    let id = ConversationId::new(&args.chat).context("Invalid conversation id")?;

    let mut documents = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let data = fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();

        documents.push(DocumentUpload {
            content_type: content_type_for(path).to_string(),
            file_name,
            data,
        });
    }

    let (client, store) = client_from_session()?;

    output::note("Uploading...");

    let receipt = check_session(
        &store,
        client
            .upload_documents(&id, &documents, args.description.as_deref())
            .await,
    )
    .await
    .context("Failed to upload documents")?;

    for status in &receipt.statuses {
        let name = status.file_name.as_deref().unwrap_or("(unnamed)");
        if status.success {
            output::success(&format!(
                "{} -> {}",
                name,
                status.document_id.as_deref().unwrap_or("?")
            ));
        } else {
            output::error(&format!(
                "{}: {}",
                name,
                status.message.as_deref().unwrap_or("upload failed")
            ));
        }
    }

    if !receipt.document_ids.is_empty() {
        println!();
        output::note("Reference these with 'confab send --document <id>'.");
    }

    Ok(())
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        _ => "application/octet-stream",
    }
}
