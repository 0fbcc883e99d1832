//! confab-http - HTTP implementation of the confab chat client.
//!
//! The centerpiece is [`AuthExecutor`], which attaches the stored access
//! token to outgoing requests and transparently refreshes it (once) when the
//! backend answers 401. [`ChatClient`] layers the typed backend operations
//! on top.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use confab_core::{BackendUrl, Credentials, MemoryTokenStore};
//! use confab_http::ChatClient;
//!
//! # async fn example() -> Result<(), confab_core::Error> {
//! let backend = BackendUrl::new("https://chat.example.com")?;
//! let client = ChatClient::new(backend, Arc::new(MemoryTokenStore::new()));
//!
//! client.login(&Credentials::new("alice@example.com", "hunter2")).await?;
//! for conversation in client.conversations().await? {
//!     println!("{}: {}", conversation.id, conversation.title);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod endpoints;
mod executor;

pub use client::ChatClient;
pub use executor::{
    ApiRequest, ApiResponse, AuthExecutor, MultipartForm, RefreshTransport, RequestBody,
};
