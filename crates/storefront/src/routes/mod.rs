//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                     - Health check
//!
//! # Catalog
//! GET    /api/products               - Product listing (?category, ?brand, ?featured, ?sort)
//! GET    /api/products/{id}          - Product detail
//! GET    /api/categories             - Categories with counts
//! GET    /api/brands                 - Brands with counts
//! GET    /api/search                 - Fuzzy search (?q)
//!
//! # Cart
//! GET    /api/cart                   - Current cart
//! POST   /api/cart/items             - Add item
//! PATCH  /api/cart/items/{line_id}   - Set quantity (<= 0 removes)
//! DELETE /api/cart/items/{line_id}   - Remove item
//! POST   /api/cart/clear             - Remove all items
//! POST   /api/cart/open              - Open drawer
//! POST   /api/cart/close             - Close drawer
//! POST   /api/cart/toggle            - Toggle drawer
//!
//! # Checkout
//! POST   /api/checkout               - Place order
//! GET    /api/order-summary          - Last order and notification link
//!
//! # Language
//! GET    /api/language               - Current language
//! PUT    /api/language               - Select language
//! POST   /api/language/toggle        - Switch language
//! GET    /api/translations           - Translation table
//!
//! # Admin
//! POST   /api/admin/login            - Sign in (?code)
//! POST   /api/admin/logout           - Sign out
//! GET    /api/admin/dashboard        - Stats and products (requires sign-in)
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod language;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(products::categories))
        .route("/brands", get(products::brands))
        .route("/search", get(search::search))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/{line_id}", patch(cart::update).delete(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/toggle", post(cart::toggle))
}

/// Create the language routes router.
pub fn language_routes() -> Router<AppState> {
    Router::new()
        .route("/language", get(language::show).put(language::set))
        .route("/language/toggle", post(language::toggle))
        .route("/translations", get(language::translations))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/dashboard", get(admin::dashboard))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::submit))
        .route("/order-summary", get(checkout::summary))
        .merge(language_routes())
        .nest("/admin", admin_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
