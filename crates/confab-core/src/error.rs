//! Error types for the confab client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, upstream, credential-store, and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for confab operations.
///
/// Every failure mode has an explicit variant so callers can react to
/// specific cases; in particular, [`AuthError`] variants are the signal to
/// force a full re-login.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses from the chat backend, passed through verbatim.
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Credential store read/write failures.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (invalid backend URL, conversation id).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// JSON (de)serialization failures on request or response bodies.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
///
/// All variants except `InvalidCredentials` are terminal for the current
/// session: the caller is expected to clear local credentials and return to
/// the login flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected a login or signup attempt.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A refresh was attempted with no refresh token in the store.
    #[error("no refresh token available")]
    NoRefreshToken,

    /// The backend rejected the refresh token.
    #[error("token refresh rejected (HTTP {status})")]
    RefreshRejected { status: u16 },

    /// The refresh endpoint was unreachable or returned an unusable body.
    #[error("session expired")]
    SessionExpired,
}

/// A non-success response from the chat backend.
///
/// The status and raw body are carried unmodified so pass-through callers
/// can relay exactly what the backend said; `error` and `message` are the
/// parsed fields of the backend's usual JSON error shape, when present.
#[derive(Debug, Clone)]
pub struct UpstreamError {
    /// HTTP status code.
    pub status: u16,
    /// Error code from the response body (if present).
    pub error: Option<String>,
    /// Error message from the response body (if present).
    pub message: Option<String>,
    /// The raw response body.
    pub body: String,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for UpstreamError {}

impl UpstreamError {
    /// Create a new upstream error.
    pub fn new(
        status: u16,
        error: Option<String>,
        message: Option<String>,
        body: String,
    ) -> Self {
        Self {
            status,
            error,
            message,
            body,
        }
    }

    /// Check if this response signals a rejected access credential.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

/// Credential store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read from the store.
    #[error("failed to read credential store: {message}")]
    Read { message: String },

    /// Failed to write to the store.
    #[error("failed to write credential store: {message}")]
    Write { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid backend URL format.
    #[error("invalid backend URL '{value}': {reason}")]
    BackendUrl { value: String, reason: String },

    /// Invalid conversation id format.
    #[error("invalid conversation id '{value}': {reason}")]
    ConversationId { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
