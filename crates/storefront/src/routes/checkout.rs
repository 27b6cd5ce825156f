//! Checkout and order summary handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::checkout::{self, CheckoutForm, OrderData, OrderSummary};
use crate::state::AppState;

/// Place an order for the current cart.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<OrderData>)> {
    let order = state
        .with_cart(move |cart, store| checkout::submit(cart, store, form, Utc::now()))
        .await??;

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_number", order.order_number.as_str())]),
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// Show the last placed order.
///
/// The first call for an order also returns the notification link.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Json<OrderSummary>> {
    let translator = state.language().lock().await.translator();
    let whatsapp_number = state.config().whatsapp_number.clone();

    state
        .with_cart(move |cart, store| {
            checkout::load_summary(cart, store, translator, &whatsapp_number)
        })
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no order has been placed".to_string()))
}
