//! Cart route handlers.
//!
//! The server holds a single demo cart. Every handler locks it, dispatches
//! one action and returns the resulting cart. Dispatch runs on the blocking
//! pool since content changes are written through to the file store.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sts_core::{ProductId, format_amount};

use crate::cart::{CartAction, CartState, ColorChoice, resolve_add};
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Cart as returned by every cart endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    #[serde(flatten)]
    pub state: CartState,
    pub item_count: u64,
    pub formatted_total: String,
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            item_count: state.item_count(),
            formatted_total: format_amount(state.total()),
            state: state.clone(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: Option<i64>,
    pub selected_color: Option<String>,
    /// Add without a color, as from a product card.
    #[serde(default)]
    pub quick_add: bool,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

async fn dispatch(state: &AppState, action: CartAction) -> Result<Json<CartView>> {
    let view = state
        .with_cart(move |cart, _| CartView::from(cart.dispatch(action)))
        .await?;
    Ok(Json(view))
}

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart().lock().await;
    Json(CartView::from(cart.state()))
}

/// Add a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(req.product_id);
    let color = ColorChoice::from_request(req.selected_color, req.quick_add);
    let action = resolve_add(
        state.catalog(),
        &product_id,
        req.quantity.unwrap_or(1),
        color,
    )
    .await?;

    add_breadcrumb("cart", "Added item", Some(&[("product_id", product_id.as_str())]));
    dispatch(&state, action).await
}

/// Set the quantity of a line. Zero or less removes it.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(line_id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    dispatch(
        &state,
        CartAction::UpdateQuantity {
            line_id,
            quantity: req.quantity,
        },
    )
    .await
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(line_id): Path<String>,
) -> Result<Json<CartView>> {
    dispatch(&state, CartAction::RemoveItem { line_id }).await
}

/// Remove every line.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartView>> {
    dispatch(&state, CartAction::ClearCart).await
}

/// Open the cart drawer.
#[instrument(skip(state))]
pub async fn open(State(state): State<AppState>) -> Result<Json<CartView>> {
    dispatch(&state, CartAction::Open).await
}

/// Close the cart drawer.
#[instrument(skip(state))]
pub async fn close(State(state): State<AppState>) -> Result<Json<CartView>> {
    dispatch(&state, CartAction::Close).await
}

/// Toggle the cart drawer.
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> Result<Json<CartView>> {
    dispatch(&state, CartAction::Toggle).await
}
