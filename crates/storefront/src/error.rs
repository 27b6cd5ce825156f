//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::cart::CartInputError;
use crate::catalog::CatalogError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Product repository failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Add-to-cart input was rejected.
    #[error("Cart error: {0}")]
    CartInput(#[from] CartInputError),

    /// Checkout was rejected or could not be stored.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Admin authentication failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Persistent storage failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Blocking task failed.
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::Unavailable(_))
            | Self::CartInput(CartInputError::Catalog(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Catalog(_)
            | Self::Store(_)
            | Self::Task(_)
            | Self::Internal(_)
            | Self::Checkout(CheckoutError::Serialize(_) | CheckoutError::Store(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::CartInput(err) => match err {
                CartInputError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                CartInputError::OutOfStock(_) => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Checkout(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Auth(err) => match err {
                AuthError::InvalidAccessCode => StatusCode::NOT_FOUND,
                AuthError::InvalidCredentials | AuthError::NotSignedIn => StatusCode::UNAUTHORIZED,
                AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            _ if status.is_server_error() => {
                if status == StatusCode::SERVICE_UNAVAILABLE {
                    "Catalog temporarily unavailable".to_string()
                } else {
                    "Internal server error".to_string()
                }
            }
            Self::CartInput(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidAccessCode => "Not found".to_string(),
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::NotSignedIn => "Not signed in".to_string(),
            },
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after an admin signs in.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("line_id", "1-Blue Titanium")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
