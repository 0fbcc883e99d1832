//! confab-core - Core types and traits for the confab chat client toolkit.
//!
//! This crate defines the pieces shared by every confab frontend: the token
//! and credential types, the error taxonomy, the credential-store trait the
//! HTTP layer is parameterized over, and the chat domain types.

pub mod chat;
pub mod credentials;
pub mod error;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use store::{MemoryTokenStore, TokenStore};
pub use tokens::{AccessToken, RefreshToken};
pub use types::{BackendUrl, ConversationId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
