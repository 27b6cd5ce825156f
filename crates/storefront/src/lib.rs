//! STS Storefront library.
//!
//! The storefront core (catalog, cart state machine, fuzzy search, checkout,
//! language preference) plus the JSON API that serves it. Exposed as a
//! library so the CLI and the integration tests drive the same code as the
//! server binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
pub mod store;

use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
