//! Admin authentication.
//!
//! The admin panel is a demo: one configured account, no user store and no
//! password hashing. The login page itself is hidden behind an access code
//! passed in the URL.

mod error;

pub use error::AuthError;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{info, instrument, warn};

use sts_core::Email;

/// A signed-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub email: Email,
    pub signed_in_at: DateTime<Utc>,
}

/// Checks the access code and the demo credentials.
#[derive(Clone)]
pub struct AdminGate {
    email: Email,
    password: SecretString,
    access_code: String,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("access_code", &"[REDACTED]")
            .finish()
    }
}

impl AdminGate {
    #[must_use]
    pub const fn new(email: Email, password: SecretString, access_code: String) -> Self {
        Self {
            email,
            password,
            access_code,
        }
    }

    /// Check the access code guarding the login page.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidAccessCode` if the code is missing or wrong.
    pub fn check_access_code(&self, code: Option<&str>) -> Result<(), AuthError> {
        match code {
            Some(code) if code == self.access_code => Ok(()),
            _ => Err(AuthError::InvalidAccessCode),
        }
    }

    /// Sign in with the access code and credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidAccessCode` for a bad code,
    /// `AuthError::InvalidEmail` if the email does not parse, and
    /// `AuthError::InvalidCredentials` if email or password do not match.
    #[instrument(skip(self, code, password), fields(email = %email))]
    pub fn login(
        &self,
        code: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<AdminSession, AuthError> {
        self.check_access_code(code)?;
        let email = Email::parse(email)?;

        if email != self.email || password != self.password.expose_secret() {
            warn!("Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        info!("Admin signed in");
        Ok(AdminSession {
            email,
            signed_in_at: Utc::now(),
        })
    }
}
