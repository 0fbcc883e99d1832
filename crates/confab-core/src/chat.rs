//! Chat domain types.
//!
//! Caller-facing shapes produced by the HTTP layer after converting the
//! backend's wire responses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ConversationId;

/// Account profile returned by the backend on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account email, when the backend includes it.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name, when the backend includes it.
    #[serde(default)]
    pub name: Option<String>,
}

/// A conversation as listed in the sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    /// Backend-assigned identifier.
    pub id: ConversationId,
    /// Conversation title.
    pub title: String,
    /// Creation timestamp, relayed verbatim from the backend.
    pub created_at: Option<String>,
    /// Last-update timestamp, relayed verbatim from the backend.
    pub updated_at: Option<String>,
}

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The model's reply.
    Assistant,
    /// The human side of the conversation.
    User,
}

// Anything the backend sends that isn't "assistant" is treated as the user's
// side, matching the original frontend's tolerance for odd role values.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "assistant" => Role::Assistant,
            _ => Role::User,
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Assistant => write!(f, "assistant"),
            Role::User => write!(f, "user"),
        }
    }
}

/// A single message in a conversation's history.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// Message text.
    pub text: String,
    /// Timestamp, relayed verbatim from the backend.
    pub timestamp: Option<String>,
}

/// The backend's reply to a sent message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    /// The conversation the message landed in (newly created when the send
    /// did not name one).
    pub conversation: ConversationId,
    /// The assistant's response text.
    pub text: String,
}

/// A document to upload into a conversation.
#[derive(Clone)]
pub struct DocumentUpload {
    /// File name presented to the backend.
    pub file_name: String,
    /// MIME type of the payload.
    pub content_type: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

// Debug prints the payload length, not the payload
impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("data", &format_args!("{} bytes", self.data.len()))
            .finish()
    }
}

/// Per-file outcome of a document upload.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatus {
    /// Whether the backend ingested this file.
    pub success: bool,
    /// Backend document id, present on success.
    pub document_id: Option<String>,
    /// File name echoed by the backend.
    pub file_name: Option<String>,
    /// Backend message, usually present on failure.
    pub message: Option<String>,
}

/// Outcome of an upload request.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    /// The conversation the documents were attached to.
    pub conversation: ConversationId,
    /// Ids of the successfully ingested documents, ready to reference in a
    /// chat message.
    pub document_ids: Vec<String>,
    /// Per-file statuses, in backend order.
    pub statuses: Vec<DocumentStatus>,
}

/// A file previously attached to a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationFile {
    /// File name.
    pub name: String,
    /// Download URL, when the backend exposes one.
    #[serde(default)]
    pub url: Option<String>,
    /// Upload timestamp, relayed verbatim.
    #[serde(default)]
    pub created_at: Option<String>,
}
