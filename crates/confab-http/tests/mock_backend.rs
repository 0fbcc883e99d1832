//! Mock backend tests for the confab HTTP client.
//!
//! These tests use wiremock to simulate the chat backend and pin down the
//! executor's refresh-and-retry behavior without network access or real
//! credentials.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use confab_core::chat::{DocumentUpload, Role};
use confab_core::error::{AuthError, Error};
use confab_core::store::{MemoryTokenStore, TokenStore};
use confab_core::types::{BackendUrl, ConversationId};
use confab_core::Credentials;
use confab_http::{ApiRequest, AuthExecutor, ChatClient, RefreshTransport};

/// Helper to create a backend URL from a mock server.
fn mock_backend_url(server: &MockServer) -> BackendUrl {
    BackendUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// Matches requests that carry no Authorization header at all.
struct NoAuthHeader;

impl wiremock::Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

/// Matches multipart form submissions (boundary supplied by the transport).
struct MultipartContentType;

impl wiremock::Match for MultipartContentType {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"))
    }
}

fn seeded_executor(server: &MockServer) -> (AuthExecutor, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::with_tokens("A1", "R1"));
    let executor = AuthExecutor::new(mock_backend_url(server), store.clone());
    (executor, store)
}

fn seeded_client(server: &MockServer) -> (ChatClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::with_tokens("A1", "R1"));
    let client = ChatClient::new(mock_backend_url(server), store.clone());
    (client, store)
}

// ============================================================================
// Refresh-and-Retry Tests
// ============================================================================

#[tokio::test]
async fn test_expired_token_refreshes_and_retries_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .and(header("authorization", "Bearer R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let (executor, store) = seeded_executor(&server);
    let response = executor.execute(ApiRequest::get("resource")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["value"], 7);

    // The refreshed token replaced the stale one.
    assert_eq!(store.access_token().await.unwrap().as_str(), "A2");
    // The refresh token is not rotated.
    assert_eq!(store.refresh_token().await.unwrap().as_str(), "R1");
}

#[tokio::test]
async fn test_second_401_after_refresh_is_terminal() {
    let server = MockServer::start().await;

    // The resource rejects both the stale and the refreshed token.
    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (executor, store) = seeded_executor(&server);
    let result = executor.execute(ApiRequest::get("resource")).await;

    // The retried 401 passes through; no second refresh is attempted.
    match result {
        Err(Error::Upstream(err)) => assert!(err.is_auth_error()),
        other => panic!("expected upstream 401, got {:?}", other.map(|r| r.status())),
    }
    assert_eq!(store.access_token().await.unwrap().as_str(), "A2");
}

#[tokio::test]
async fn test_refresh_rejected_abandons_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid refresh token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (executor, store) = seeded_executor(&server);
    let result = executor.execute(ApiRequest::get("resource")).await;

    match result {
        Err(Error::Auth(AuthError::RefreshRejected { status })) => assert_eq!(status, 401),
        other => panic!("expected RefreshRejected, got {:?}", other.map(|r| r.status())),
    }

    // The stale credentials are left in place for the session layer.
    assert_eq!(store.access_token().await.unwrap().as_str(), "A1");
    assert_eq!(store.refresh_token().await.unwrap().as_str(), "R1");
}

#[tokio::test]
async fn test_success_passes_through_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("payload"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (executor, _store) = seeded_executor(&server);
    let response = executor.execute(ApiRequest::get("resource")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.body(), b"payload");
}

#[tokio::test]
async fn test_non_401_error_passes_through_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (executor, store) = seeded_executor(&server);
    let result = executor.execute(ApiRequest::get("resource")).await;

    match result {
        Err(Error::Upstream(err)) => {
            assert_eq!(err.status, 500);
            assert_eq!(err.body, "Internal Server Error");
        }
        other => panic!("expected upstream 500, got {:?}", other.map(|r| r.status())),
    }
    assert_eq!(store.access_token().await.unwrap().as_str(), "A1");
}

#[tokio::test]
async fn test_empty_store_degrades_to_anonymous_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let executor = AuthExecutor::new(mock_backend_url(&server), store.clone());
    let result = executor.execute(ApiRequest::get("resource")).await;

    // No refresh token: the failure is immediate and no refresh call is made.
    match result {
        Err(Error::Auth(AuthError::NoRefreshToken)) => {}
        other => panic!("expected NoRefreshToken, got {:?}", other.map(|r| r.status())),
    }
    assert!(store.access_token().await.is_none());
}

#[tokio::test]
async fn test_missing_refresh_token_leaves_access_token_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // Access token present, refresh token absent.
    let store = Arc::new(MemoryTokenStore::new());
    store
        .store_access_token(&confab_core::AccessToken::new("A1"))
        .await
        .unwrap();

    let executor = AuthExecutor::new(mock_backend_url(&server), store.clone());
    let result = executor.execute(ApiRequest::get("resource")).await;

    match result {
        Err(Error::Auth(AuthError::NoRefreshToken)) => {}
        other => panic!("expected NoRefreshToken, got {:?}", other.map(|r| r.status())),
    }
    // The stale access token is left in place.
    assert_eq!(store.access_token().await.unwrap().as_str(), "A1");
}

#[tokio::test]
async fn test_anonymous_execute_never_refreshes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (executor, _store) = seeded_executor(&server);
    let result = executor
        .execute_anonymous(ApiRequest::post("login"))
        .await;

    match result {
        Err(Error::Upstream(err)) => assert_eq!(err.status, 401),
        other => panic!("expected upstream 401, got {:?}", other.map(|r| r.status())),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_401s_collapse_into_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    // The slow refresh keeps the second caller waiting on the gate until
    // the first caller has stored the new token.
    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .and(header("authorization", "Bearer R1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "A2"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;

    let (executor, store) = seeded_executor(&server);
    let second = executor.clone();

    let (a, b) = tokio::join!(
        executor.execute(ApiRequest::get("resource")),
        second.execute(ApiRequest::get("resource")),
    );

    assert_eq!(a.unwrap().status().as_u16(), 200);
    assert_eq!(b.unwrap().status().as_u16(), 200);
    assert_eq!(store.access_token().await.unwrap().as_str(), "A2");
}

#[tokio::test]
async fn test_cookie_refresh_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // The refresh token travels as a cookie, not a bearer credential.
    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .and(header("cookie", "refresh_token=R1"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/resource"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens("A1", "R1"));
    let executor = AuthExecutor::with_transport(
        mock_backend_url(&server),
        store.clone(),
        RefreshTransport::Cookie,
    );

    let response = executor.execute(ApiRequest::get("resource")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(store.access_token().await.unwrap().as_str(), "A2");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_stores_token_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "user": {"email": "alice@example.com", "name": "Alice"},
            "access_token": "access-1",
            "refresh_token": "refresh-1"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = ChatClient::new(mock_backend_url(&server), store.clone());

    let profile = client
        .login(&Credentials::new("alice@example.com", "secret123"))
        .await
        .unwrap();

    assert_eq!(profile.unwrap().name.as_deref(), Some("Alice"));
    assert_eq!(store.access_token().await.unwrap().as_str(), "access-1");
    assert_eq!(store.refresh_token().await.unwrap().as_str(), "refresh-1");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "wrong email or password"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = ChatClient::new(mock_backend_url(&server), store.clone());

    let result = client
        .login(&Credentials::new("bad@example.com", "wrongpass"))
        .await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::InvalidCredentials))
    ));
    assert!(store.access_token().await.is_none());
}

#[tokio::test]
async fn test_signup_relays_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(json!({
            "email": "bob@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "account created"
        })))
        .mount(&server)
        .await;

    let client = ChatClient::new(mock_backend_url(&server), Arc::new(MemoryTokenStore::new()));
    let message = client
        .signup(&Credentials::new("bob@example.com", "secret123"))
        .await
        .unwrap();

    assert_eq!(message.as_deref(), Some("account created"));
}

#[tokio::test]
async fn test_logout_clears_store_even_when_backend_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (client, store) = seeded_client(&server);
    client.logout().await.unwrap();

    assert!(store.access_token().await.is_none());
    assert!(store.refresh_token().await.is_none());
}

// ============================================================================
// Conversation Tests
// ============================================================================

#[tokio::test]
async fn test_conversations_tolerate_id_field_variants() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/conversations"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversations": [
                {"conversationID": 3, "title": "groceries"},
                {"conversation_id": "7", "title": "trip planning"},
                {"id": 9}
            ]
        })))
        .mount(&server)
        .await;

    let (client, _store) = seeded_client(&server);
    let conversations = client.conversations().await.unwrap();

    assert_eq!(conversations.len(), 3);
    assert_eq!(conversations[0].id.as_str(), "3");
    assert_eq!(conversations[1].id.as_str(), "7");
    assert_eq!(conversations[2].id.as_str(), "9");
    // Untitled conversations get the default title.
    assert_eq!(conversations[2].title, "New chat");
}

#[tokio::test]
async fn test_create_conversation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/conversations/new"))
        .and(body_json(json!({"title": "reading list"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "conversation_id": 12
        })))
        .mount(&server)
        .await;

    let (client, _store) = seeded_client(&server);
    let conversation = client.create_conversation(Some("reading list")).await.unwrap();

    assert_eq!(conversation.id.as_str(), "12");
    assert_eq!(conversation.title, "reading list");
}

#[tokio::test]
async fn test_rename_and_delete_conversation() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/conversations/7"))
        .and(body_json(json!({"title": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/conversations/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = seeded_client(&server);
    let id = ConversationId::new("7").unwrap();

    client.rename_conversation(&id, "renamed").await.unwrap();
    client.delete_conversation(&id).await.unwrap();
}

#[tokio::test]
async fn test_rename_rejects_blank_title() {
    let server = MockServer::start().await;
    let (client, _store) = seeded_client(&server);
    let id = ConversationId::new("7").unwrap();

    let result = client.rename_conversation(&id, "   ").await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_history_parses_messages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/conversations/7/history"))
        .and(query_param("limit", "50"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"role": "user", "text": "hello", "timestamp": "2024-05-01T10:00:00Z"},
                {"role": "assistant", "text": "hi there"},
                {"role": "system", "text": "odd role"}
            ]
        })))
        .mount(&server)
        .await;

    let (client, _store) = seeded_client(&server);
    let id = ConversationId::new("7").unwrap();
    let messages = client.history(&id, Some(50), Some(0)).await.unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].text, "hi there");
    // Unknown roles collapse to the user side.
    assert_eq!(messages[2].role, Role::User);
}

// ============================================================================
// Messaging Tests
// ============================================================================

#[tokio::test]
async fn test_send_message_roundtrip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "query_text": "what does the contract say?",
            "conversation_id": "5",
            "document_ids": ["doc-1"],
            "title": "New chat"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversation_id": 5,
            "response": "Section 3 covers termination."
        })))
        .mount(&server)
        .await;

    let (client, _store) = seeded_client(&server);
    let id = ConversationId::new("5").unwrap();
    let reply = client
        .send_message(
            Some(&id),
            "what does the contract say?",
            &["doc-1".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(reply.conversation.as_str(), "5");
    assert_eq!(reply.text, "Section 3 covers termination.");
}

#[tokio::test]
async fn test_send_message_refreshes_expired_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .and(header("authorization", "Bearer R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversation_id": 8,
            "response": "hello again"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = seeded_client(&server);
    let reply = client.send_message(None, "hello", &[]).await.unwrap();

    assert_eq!(reply.conversation.as_str(), "8");
    assert_eq!(store.access_token().await.unwrap().as_str(), "A2");
}

#[tokio::test]
async fn test_blank_message_rejected_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _store) = seeded_client(&server);
    let result = client.send_message(None, "   ", &[]).await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

// ============================================================================
// Document Tests
// ============================================================================

#[tokio::test]
async fn test_upload_collects_successful_document_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload_pdf/7"))
        .and(header("authorization", "Bearer A1"))
        .and(MultipartContentType)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"success": true, "document_id": "doc-1", "filename": "a.pdf"},
                {"success": false, "message": "unreadable"},
                {"success": true, "document_id": "doc-2", "filename": "b.pdf"}
            ]
        })))
        .mount(&server)
        .await;

    let (client, _store) = seeded_client(&server);
    let id = ConversationId::new("7").unwrap();
    let documents = vec![
        DocumentUpload {
            file_name: "a.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: vec![1, 2, 3],
        },
        DocumentUpload {
            file_name: "b.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: vec![4, 5, 6],
        },
    ];

    let receipt = client.upload_documents(&id, &documents, None).await.unwrap();

    assert_eq!(receipt.document_ids, vec!["doc-1", "doc-2"]);
    assert_eq!(receipt.statuses.len(), 3);
    assert!(!receipt.statuses[1].success);
    assert_eq!(receipt.statuses[1].message.as_deref(), Some("unreadable"));
}

#[tokio::test]
async fn test_upload_with_no_documents_is_rejected() {
    let server = MockServer::start().await;
    let (client, _store) = seeded_client(&server);
    let id = ConversationId::new("7").unwrap();

    let result = client.upload_documents(&id, &[], None).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_files_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/conversations/7/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversation_id": 7,
            "files": [
                {"name": "a.pdf", "url": "https://files.example.com/a.pdf",
                 "created_at": "2024-05-01T10:00:00Z"},
                {"name": "b.pdf"}
            ]
        })))
        .mount(&server)
        .await;

    let (client, _store) = seeded_client(&server);
    let id = ConversationId::new("7").unwrap();
    let files = client.files(&id).await.unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].name, "a.pdf");
    assert!(files[0].url.is_some());
    assert!(files[1].url.is_none());
}
