//! High-level chat backend client.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use confab_core::Result;
use confab_core::chat::{
    ChatMessage, ChatReply, Conversation, ConversationFile, DocumentStatus, DocumentUpload,
    UploadReceipt, UserProfile,
};
use confab_core::credentials::Credentials;
use confab_core::error::{AuthError, Error, InvalidInputError};
use confab_core::store::TokenStore;
use confab_core::tokens::{AccessToken, RefreshToken};
use confab_core::types::{BackendUrl, ConversationId};

use crate::endpoints::{
    CHAT, CONVERSATIONS, ChatRequest, ChatResponse, ConversationsResponse, FilesResponse,
    HistoryResponse, LOGIN, LOGOUT, LoginRequest, LoginResponse, NEW_CONVERSATION,
    NewConversationRequest, NewConversationResponse, REGISTER, RegisterRequest, RegisterResponse,
    RenameConversationRequest, UploadResponse, conversation_path, files_path, history_path,
    upload_path,
};
use crate::executor::{ApiRequest, AuthExecutor, MultipartForm, RefreshTransport};

/// Title applied when the caller doesn't name one; the backend requires a
/// title when a message creates its conversation.
const DEFAULT_TITLE: &str = "New chat";

/// History page size used when the caller doesn't specify one.
const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// Typed client for the chat backend.
///
/// Every operation except login and signup flows through the authenticated
/// executor and therefore inherits the refresh-and-retry behavior. The
/// client is cheap to clone and safe to share across tasks.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use confab_core::{BackendUrl, Credentials, MemoryTokenStore};
/// use confab_http::ChatClient;
///
/// # async fn example() -> Result<(), confab_core::Error> {
/// let backend = BackendUrl::new("https://chat.example.com")?;
/// let client = ChatClient::new(backend, Arc::new(MemoryTokenStore::new()));
///
/// client.login(&Credentials::new("alice@example.com", "hunter2")).await?;
/// let reply = client.send_message(None, "hello there", &[]).await?;
/// println!("{}", reply.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChatClient {
    executor: AuthExecutor,
}

impl ChatClient {
    /// Create a client with the default (bearer) refresh transport.
    pub fn new(base: BackendUrl, store: Arc<dyn TokenStore>) -> Self {
        Self {
            executor: AuthExecutor::new(base, store),
        }
    }

    /// Create a client with an explicit refresh transport.
    pub fn with_transport(
        base: BackendUrl,
        store: Arc<dyn TokenStore>,
        transport: RefreshTransport,
    ) -> Self {
        Self {
            executor: AuthExecutor::with_transport(base, store, transport),
        }
    }

    /// Returns the backend URL this client talks to.
    pub fn base(&self) -> &BackendUrl {
        self.executor.base()
    }

    /// Returns the underlying executor, for callers that need raw requests.
    pub fn executor(&self) -> &AuthExecutor {
        &self.executor
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Authenticate and store the returned credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the backend rejects
    /// the email/password pair.
    #[instrument(skip(self, credentials), fields(backend = %self.base(), email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Option<UserProfile>> {
        info!("Logging in");

        let request = ApiRequest::post(LOGIN).json(&LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        })?;

        let response = match self.executor.execute_anonymous(request).await {
            Ok(response) => response,
            Err(Error::Upstream(err)) if err.is_auth_error() => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(err) => return Err(err),
        };

        let body: LoginResponse = response.json()?;
        self.executor
            .store()
            .store_token_pair(
                &AccessToken::new(body.access_token),
                &RefreshToken::new(body.refresh_token),
            )
            .await?;

        debug!("login succeeded");
        Ok(body.user)
    }

    /// Create a new account. Returns the backend's confirmation message.
    #[instrument(skip(self, credentials), fields(backend = %self.base(), email = %credentials.email()))]
    pub async fn signup(&self, credentials: &Credentials) -> Result<Option<String>> {
        info!("Creating account");

        let request = ApiRequest::post(REGISTER).json(&RegisterRequest {
            email: credentials.email(),
            password: credentials.password(),
        })?;

        let response = self.executor.execute_anonymous(request).await?;
        let body: RegisterResponse = response.json()?;
        Ok(body.message)
    }

    /// Log out and clear the stored credentials.
    ///
    /// The store is cleared even when the backend call fails; an expired
    /// session must always be clearable locally.
    #[instrument(skip(self), fields(backend = %self.base()))]
    pub async fn logout(&self) -> Result<()> {
        if let Err(err) = self.executor.execute(ApiRequest::post(LOGOUT)).await {
            debug!(error = %err, "backend logout failed, clearing local credentials anyway");
        }
        self.executor.store().clear().await
    }

    /// Force a token refresh without issuing a resource request.
    pub async fn refresh(&self) -> Result<()> {
        self.executor.force_refresh().await.map(|_| ())
    }

    // ========================================================================
    // Conversations
    // ========================================================================

    /// List the account's conversations.
    #[instrument(skip(self), fields(backend = %self.base()))]
    pub async fn conversations(&self) -> Result<Vec<Conversation>> {
        debug!("Listing conversations");

        let response = self.executor.execute(ApiRequest::get(CONVERSATIONS)).await?;
        let body: ConversationsResponse = response.json()?;

        Ok(body
            .conversations
            .into_iter()
            .map(|entry| Conversation {
                id: entry.conversation_id,
                title: entry.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                created_at: entry.created_at,
                updated_at: entry.updated_at,
            })
            .collect())
    }

    /// Create a new conversation.
    #[instrument(skip(self), fields(backend = %self.base()))]
    pub async fn create_conversation(&self, title: Option<&str>) -> Result<Conversation> {
        debug!("Creating conversation");

        let title = title.unwrap_or(DEFAULT_TITLE);
        let request =
            ApiRequest::post(NEW_CONVERSATION).json(&NewConversationRequest { title })?;

        let response = self.executor.execute(request).await?;
        let body: NewConversationResponse = response.json()?;

        Ok(Conversation {
            id: body.conversation_id,
            title: body.title.unwrap_or_else(|| title.to_string()),
            created_at: None,
            updated_at: None,
        })
    }

    /// Rename a conversation.
    #[instrument(skip(self), fields(backend = %self.base(), %id))]
    pub async fn rename_conversation(&self, id: &ConversationId, title: &str) -> Result<()> {
        debug!("Renaming conversation");

        let title = title.trim();
        if title.is_empty() {
            return Err(InvalidInputError::Other {
                message: "conversation title is empty".to_string(),
            }
            .into());
        }

        let request =
            ApiRequest::put(conversation_path(id)).json(&RenameConversationRequest { title })?;
        self.executor.execute(request).await?;
        Ok(())
    }

    /// Delete a conversation.
    #[instrument(skip(self), fields(backend = %self.base(), %id))]
    pub async fn delete_conversation(&self, id: &ConversationId) -> Result<()> {
        debug!("Deleting conversation");

        self.executor
            .execute(ApiRequest::delete(conversation_path(id)))
            .await?;
        Ok(())
    }

    /// Fetch a page of a conversation's message history.
    #[instrument(skip(self), fields(backend = %self.base(), %id))]
    pub async fn history(
        &self,
        id: &ConversationId,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<ChatMessage>> {
        debug!("Fetching history");

        let request = ApiRequest::get(history_path(id))
            .query("limit", limit.unwrap_or(DEFAULT_HISTORY_LIMIT).to_string())
            .query("offset", offset.unwrap_or(0).to_string());

        let response = self.executor.execute(request).await?;
        let body: HistoryResponse = response.json()?;

        Ok(body
            .messages
            .into_iter()
            .map(|entry| ChatMessage {
                role: entry.role,
                text: entry.text,
                timestamp: entry.timestamp,
            })
            .collect())
    }

    // ========================================================================
    // Messaging
    // ========================================================================

    /// Send a message, optionally into an existing conversation.
    ///
    /// With `conversation` unset the backend creates a conversation and the
    /// reply names it. `document_ids` reference previously uploaded
    /// documents to ground the response in.
    #[instrument(skip(self, text), fields(backend = %self.base()))]
    pub async fn send_message(
        &self,
        conversation: Option<&ConversationId>,
        text: &str,
        document_ids: &[String],
    ) -> Result<ChatReply> {
        if text.trim().is_empty() {
            return Err(InvalidInputError::Other {
                message: "message text is empty".to_string(),
            }
            .into());
        }

        debug!("Sending message");

        let request = ApiRequest::post(CHAT).json(&ChatRequest {
            query_text: text,
            conversation_id: conversation,
            document_ids,
            title: DEFAULT_TITLE,
        })?;

        let response = self.executor.execute(request).await?;
        let body: ChatResponse = response.json()?;

        Ok(ChatReply {
            conversation: body.conversation_id,
            text: body.response,
        })
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Upload documents into a conversation.
    ///
    /// Returns a receipt with the ids of the successfully ingested files;
    /// pass those to [`ChatClient::send_message`] to chat over them.
    #[instrument(skip(self, documents), fields(backend = %self.base(), %id, count = documents.len()))]
    pub async fn upload_documents(
        &self,
        id: &ConversationId,
        documents: &[DocumentUpload],
        description: Option<&str>,
    ) -> Result<UploadReceipt> {
        if documents.is_empty() {
            return Err(InvalidInputError::Other {
                message: "no documents to upload".to_string(),
            }
            .into());
        }

        debug!("Uploading documents");

        let mut form = MultipartForm::new().text("description", description.unwrap_or("pdf"));
        for document in documents {
            form = form.file(
                "files",
                document.file_name.clone(),
                document.content_type.clone(),
                document.data.clone(),
            );
        }

        let request = ApiRequest::post(upload_path(id)).multipart(form);
        let response = self.executor.execute(request).await?;
        let body: UploadResponse = response.json()?;

        let document_ids = body
            .results
            .iter()
            .filter(|entry| entry.success)
            .filter_map(|entry| entry.document_id.clone())
            .collect();

        let statuses = body
            .results
            .into_iter()
            .map(|entry| DocumentStatus {
                success: entry.success,
                document_id: entry.document_id,
                file_name: entry.file_name,
                message: entry.message,
            })
            .collect();

        Ok(UploadReceipt {
            conversation: id.clone(),
            document_ids,
            statuses,
        })
    }

    /// List the files previously attached to a conversation.
    #[instrument(skip(self), fields(backend = %self.base(), %id))]
    pub async fn files(&self, id: &ConversationId) -> Result<Vec<ConversationFile>> {
        debug!("Listing conversation files");

        let response = self
            .executor
            .execute(ApiRequest::get(files_path(id)))
            .await?;
        let body: FilesResponse = response.json()?;
        Ok(body.files)
    }
}
