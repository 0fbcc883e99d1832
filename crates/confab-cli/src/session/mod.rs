//! Session persistence for the CLI.
//!
//! The CLI keeps the backend URL, the account email, and the credential pair
//! in a single JSON file so a login survives across invocations. The token
//! half of that file is exposed to the client layer through the
//! [`confab_core::TokenStore`] trait.

mod store;

pub use store::FileTokenStore;
