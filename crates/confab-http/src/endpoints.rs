//! Chat backend endpoint definitions and wire types.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use confab_core::chat::UserProfile;
use confab_core::types::ConversationId;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST api/login
pub const LOGIN: &str = "login";

/// POST api/register
pub const REGISTER: &str = "register";

/// POST api/logout
pub const LOGOUT: &str = "logout";

/// POST api/refresh
pub const REFRESH: &str = "refresh";

/// GET api/conversations
pub const CONVERSATIONS: &str = "conversations";

/// POST api/conversations/new
pub const NEW_CONVERSATION: &str = "conversations/new";

/// POST api/chat
pub const CHAT: &str = "chat";

/// Cookie name carrying the refresh token in cookie deployments.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// PUT/DELETE api/conversations/{id}
pub fn conversation_path(id: &ConversationId) -> String {
    format!("conversations/{}", id)
}

/// GET api/conversations/{id}/history
pub fn history_path(id: &ConversationId) -> String {
    format!("conversations/{}/history", id)
}

/// POST api/upload_pdf/{id}
pub fn upload_path(id: &ConversationId) -> String {
    format!("upload_pdf/{}", id)
}

/// GET api/chat/conversations/{id}/files
pub fn files_path(id: &ConversationId) -> String {
    format!("chat/conversations/{}/files", id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Request body for signup.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from signup.
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from refresh.
/// Note: the refresh token travels in the Authorization header or cookie,
/// never the body, and is not rotated by the backend.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Response from the conversations listing.
#[derive(Debug, Deserialize)]
pub struct ConversationsResponse {
    #[serde(default)]
    pub conversations: Vec<ConversationEntry>,
}

/// A single conversation entry.
///
/// The backend has emitted the id under several names over time; all are
/// accepted.
#[derive(Debug, Deserialize)]
pub struct ConversationEntry {
    #[serde(alias = "conversationID", alias = "id")]
    pub conversation_id: ConversationId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request body for creating a conversation.
#[derive(Debug, Serialize)]
pub struct NewConversationRequest<'a> {
    pub title: &'a str,
}

/// Response from creating a conversation.
#[derive(Debug, Deserialize)]
pub struct NewConversationResponse {
    pub conversation_id: ConversationId,
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for renaming a conversation.
#[derive(Debug, Serialize)]
pub struct RenameConversationRequest<'a> {
    pub title: &'a str,
}

/// Request body for sending a chat message.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub query_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<&'a ConversationId>,
    pub document_ids: &'a [String],
    pub title: &'a str,
}

/// Response from sending a chat message.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub conversation_id: ConversationId,
    pub response: String,
}

/// Response from the history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<MessageEntry>,
}

/// A single message in a history response.
#[derive(Debug, Deserialize)]
pub struct MessageEntry {
    pub role: confab_core::chat::Role,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Response from a document upload.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub results: Vec<UploadResultEntry>,
}

/// Per-file result of a document upload.
#[derive(Debug, Deserialize)]
pub struct UploadResultEntry {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default, alias = "filename")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from the files listing.
#[derive(Debug, Deserialize)]
pub struct FilesResponse {
    #[serde(default)]
    pub files: Vec<confab_core::chat::ConversationFile>,
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct BackendErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
