//! Integration tests for STS.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sts-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_roundtrip` - Cart and language persistence across restarts
//! - `checkout_flow` - Cart to order summary, notification issued once
//! - `http_api` - JSON API driven through the router with `oneshot`
//!
//! Every test gets its own data directory, so tests run in parallel without
//! sharing state.

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use sts_storefront::config::StorefrontConfig;
use sts_storefront::state::AppState;
use sts_storefront::store::FileStore;

/// An isolated data directory and the configuration pointing at it.
///
/// The directory is removed on drop.
pub struct TestContext {
    data_dir: PathBuf,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let data_dir = std::env::temp_dir().join(format!("sts-it-{}", Uuid::new_v4()));
        Self { data_dir }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Default configuration with the data directory overridden.
    ///
    /// # Panics
    ///
    /// Panics if the defaults fail to parse.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        let data_dir = self.data_dir.display().to_string();
        StorefrontConfig::from_lookup(|key| (key == "STS_DATA_DIR").then(|| data_dir.clone()))
            .expect("default configuration is valid")
    }

    /// Open the storefront state, as a fresh process would.
    ///
    /// # Panics
    ///
    /// Panics if the data directory cannot be created.
    #[must_use]
    pub fn open_state(&self) -> AppState {
        AppState::open(self.config()).expect("failed to open storefront state")
    }

    /// Direct access to the files backing the state.
    ///
    /// # Panics
    ///
    /// Panics if the data directory cannot be created.
    #[must_use]
    pub fn file_store(&self) -> FileStore {
        FileStore::open(&self.data_dir).expect("failed to open file store")
    }

    /// The full application router over a freshly opened state.
    #[must_use]
    pub fn app(&self) -> Router {
        sts_storefront::app(self.open_state())
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

/// Send one request through `app` and decode the JSON body.
///
/// Empty bodies decode as `Value::Null` and non-JSON bodies as a string.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be read.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}
