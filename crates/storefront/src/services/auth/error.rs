//! Authentication error types.

use thiserror::Error;

/// Errors that can occur when signing in to the admin panel.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The access code in the login URL is missing or wrong.
    #[error("invalid access code")]
    InvalidAccessCode,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] sts_core::EmailError),

    /// Wrong email or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The request requires a signed-in admin.
    #[error("not signed in")]
    NotSignedIn,
}
