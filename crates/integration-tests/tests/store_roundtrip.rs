//! Persistence across restarts through the file-backed store.
//!
//! Each "restart" opens a fresh `AppState` over the same data directory.

#![allow(clippy::unwrap_used)]

use sts_core::{Language, ProductId};
use sts_integration_tests::TestContext;
use sts_storefront::cart::{CartAction, ColorChoice, resolve_add};
use sts_storefront::store::{KeyValueStore, keys};

async fn add(state: &sts_storefront::state::AppState, id: &str, quantity: i64, color: &str) {
    let action = resolve_add(
        state.catalog(),
        &ProductId::new(id),
        quantity,
        ColorChoice::Explicit(color.to_string()),
    )
    .await
    .unwrap();
    state.cart().lock().await.dispatch(action);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();

    {
        let state = ctx.open_state();
        add(&state, "3", 2, "Black").await;
        add(&state, "9", 1, "White").await;
    }

    let state = ctx.open_state();
    let cart = state.cart().lock().await;
    let lines: Vec<_> = cart.state().items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(lines, ["3-Black", "9-White"]);
    assert_eq!(cart.state().total().to_string(), "119");
}

#[tokio::test]
async fn test_drawer_state_not_persisted() {
    let ctx = TestContext::new();

    {
        let state = ctx.open_state();
        add(&state, "3", 1, "White").await;
        state.cart().lock().await.dispatch(CartAction::Open);
    }

    let state = ctx.open_state();
    let cart = state.cart().lock().await;
    assert!(!cart.state().is_open());
    assert_eq!(cart.state().items().len(), 1);
}

#[tokio::test]
async fn test_clear_is_persisted() {
    let ctx = TestContext::new();

    {
        let state = ctx.open_state();
        add(&state, "5", 1, "Brown").await;
        state.cart().lock().await.dispatch(CartAction::ClearCart);
    }

    let state = ctx.open_state();
    assert!(state.cart().lock().await.state().is_empty());
}

#[tokio::test]
async fn test_corrupt_cart_starts_empty() {
    let ctx = TestContext::new();
    ctx.file_store().set(keys::CART, "{not json").unwrap();

    let state = ctx.open_state();
    assert!(state.cart().lock().await.state().is_empty());
}

#[tokio::test]
async fn test_stored_total_is_recomputed() {
    let ctx = TestContext::new();

    {
        let state = ctx.open_state();
        add(&state, "3", 2, "Black").await;
    }

    // Tamper with the stored total only.
    let store = ctx.file_store();
    let mut snapshot: serde_json::Value =
        serde_json::from_str(&store.get(keys::CART).unwrap().unwrap()).unwrap();
    snapshot["total"] = serde_json::json!(1);
    store.set(keys::CART, &snapshot.to_string()).unwrap();

    let state = ctx.open_state();
    assert_eq!(state.cart().lock().await.state().total().to_string(), "90");
}

#[tokio::test]
async fn test_written_snapshot_layout() {
    let ctx = TestContext::new();
    {
        let state = ctx.open_state();
        add(&state, "6", 4, "Clear").await;
    }

    let raw = ctx.file_store().get(keys::CART).unwrap().unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot["total"], serde_json::json!(60.0));
    assert_eq!(snapshot["items"][0]["id"], "6-Clear");
    assert_eq!(snapshot["items"][0]["selectedColor"], "Clear");
    assert_eq!(snapshot["items"][0]["product"]["inStock"], true);
    assert!(snapshot.get("isOpen").is_none());
}

// ============================================================================
// Language
// ============================================================================

#[tokio::test]
async fn test_language_survives_restart() {
    let ctx = TestContext::new();

    {
        let state = ctx.open_state();
        assert_eq!(state.language().lock().await.toggle(), Language::Ar);
    }

    let state = ctx.open_state();
    assert_eq!(state.language().lock().await.current(), Language::Ar);
}

#[tokio::test]
async fn test_unknown_language_falls_back_to_english() {
    let ctx = TestContext::new();
    ctx.file_store().set(keys::LANGUAGE, "fr").unwrap();

    let state = ctx.open_state();
    assert_eq!(state.language().lock().await.current(), Language::En);
}
