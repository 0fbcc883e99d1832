//! Login credentials type.

use std::fmt;

/// Login credentials for chat backend authentication.
///
/// Carries the email address and password the backend's login and signup
/// endpoints expect. Not persisted anywhere; once the backend answers with a
/// token pair, the tokens are what gets stored.
///
/// # Security
///
/// The password never appears in Debug output.
///
/// # Example
///
/// ```
/// use confab_core::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter2");
/// assert_eq!(creds.email(), "alice@example.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the account email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use only when building a login or signup request body. Never log or
    /// display this value.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Password never appears in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
