//! JSON API tests driven through the router without a socket.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;
use sts_integration_tests::{TestContext, send};
use sts_storefront::store::KeyValueStore;

// ============================================================================
// Health & Catalog
// ============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let (status, body) = send(&ctx.app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_products_filtered_and_sorted() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/products?category=phones&sort=priceAsc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["7", "8", "2", "1"]);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/products?category=chargers&brand=samsung",
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "9");

    let (_, body) = send(&app, Method::GET, "/api/products?featured=true", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, Method::GET, "/api/products?category=tablets", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_product_detail() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (status, body) = send(&app, Method::GET, "/api/products/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "AirPods Pro (2nd Generation)");
    assert_eq!(body["price"], json!(249.0));
    assert_eq!(body["inStock"], true);

    let (status, body) = send(&app, Method::GET, "/api/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_categories_localized() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (_, body) = send(&app, Method::GET, "/api/categories", None).await;
    let phones = body
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == "phones")
        .unwrap();
    assert_eq!(phones["count"], 4);
    let english = phones["name"].as_str().unwrap().to_string();

    send(&app, Method::POST, "/api/language/toggle", None).await;
    let (_, body) = send(&app, Method::GET, "/api/categories", None).await;
    let phones = body
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == "phones")
        .unwrap();
    assert_ne!(phones["name"].as_str().unwrap(), english);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_tolerates_typos() {
    let ctx = TestContext::new();
    let (status, body) = send(&ctx.app(), Method::GET, "/api/search?q=iphoen", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "iphoen");
    assert_eq!(body["hits"][0]["product"]["id"], "1");
    assert_eq!(body["hits"][0]["distance"], 1);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_search_short_and_unmatched_queries() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (_, body) = send(&app, Method::GET, "/api/search?q=i", None).await;
    assert_eq!(body["hits"], json!([]));

    let (_, body) = send(&app, Method::GET, "/api/search?q=xyzzy", None).await;
    assert_eq!(body["hits"], json!([]));
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_lifecycle() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cart/items",
        Some(json!({ "productId": "3", "quantity": 2, "selectedColor": "Black" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["id"], "3-Black");
    assert_eq!(body["itemCount"], 2);
    assert_eq!(body["formattedTotal"], "$90.00");

    // Same product and color merges into one line.
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/cart/items",
        Some(json!({ "productId": "3", "selectedColor": "Black" })),
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 3);

    // Quick add uses the color-less line.
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/cart/items",
        Some(json!({ "productId": "6", "quickAdd": true })),
    )
    .await;
    assert_eq!(body["items"][1]["id"], "6-default");

    let (_, body) = send(
        &app,
        Method::PATCH,
        "/api/cart/items/3-Black",
        Some(json!({ "quantity": 1 })),
    )
    .await;
    assert_eq!(body["total"], json!(60.0));

    let (_, body) = send(
        &app,
        Method::PATCH,
        "/api/cart/items/6-default",
        Some(json!({ "quantity": 0 })),
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::DELETE, "/api/cart/items/3-Black", None).await;
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], json!(0.0));
}

#[tokio::test]
async fn test_cart_default_color() {
    let ctx = TestContext::new();
    let (_, body) = send(
        &ctx.app(),
        Method::POST,
        "/api/cart/items",
        Some(json!({ "productId": "5" })),
    )
    .await;
    assert_eq!(body["items"][0]["id"], "5-Black");
}

#[tokio::test]
async fn test_cart_rejects_invalid_input() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/cart/items",
        Some(json!({ "productId": "3", "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/cart/items",
        Some(json!({ "productId": "3", "selectedColor": "Purple" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/cart/items",
        Some(json!({ "productId": "999" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/cart", None).await;
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_cart_drawer() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (_, body) = send(&app, Method::POST, "/api/cart/toggle", None).await;
    assert_eq!(body["isOpen"], true);
    let (_, body) = send(&app, Method::POST, "/api/cart/close", None).await;
    assert_eq!(body["isOpen"], false);
    let (_, body) = send(&app, Method::POST, "/api/cart/open", None).await;
    assert_eq!(body["isOpen"], true);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_all_written() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let mut requests = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let app = app.clone();
        requests.spawn(async move {
            let body = json!({"productId": "6", "selectedColor": "Clear"});
            send(&app, Method::POST, "/api/cart/items", Some(body)).await
        });
    }
    while let Some(result) = requests.join_next().await {
        assert_eq!(result.unwrap().0, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/api/cart", None).await;
    assert_eq!(body["itemCount"], 20);

    let stored = ctx.file_store().get("cart").unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored["items"][0]["quantity"], 20);
    assert_eq!(stored["total"], json!(300.0));
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_and_summary() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (status, _) = send(&app, Method::GET, "/api/order-summary", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let form = json!({
        "name": "Rami",
        "phone": "70123456",
        "city": "Beirut",
        "paymentMethod": "wishMoney",
    });

    let (status, _) = send(&app, Method::POST, "/api/checkout", Some(form.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(
        &app,
        Method::POST,
        "/api/cart/items",
        Some(json!({ "productId": "4" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "name": " ", "phone": "", "city": "Beirut" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required fields: name, phone");

    let (status, order) = send(&app, Method::POST, "/api/checkout", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["customerInfo"]["paymentMethod"], "whishMoney");
    assert_eq!(order["total"], json!(249.0));
    assert!(order["orderNumber"].as_str().unwrap().starts_with("STS-"));

    let (status, summary) = send(&app, Method::GET, "/api/order-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["order"]["orderNumber"], order["orderNumber"]);
    assert!(summary["notificationUrl"].is_string());

    let (_, cart) = send(&app, Method::GET, "/api/cart", None).await;
    assert_eq!(cart["items"], json!([]));

    let (_, summary) = send(&app, Method::GET, "/api/order-summary", None).await;
    assert!(summary.get("notificationUrl").is_none());
    assert!(summary["shareUrl"].is_string());
}

// ============================================================================
// Language
// ============================================================================

#[tokio::test]
async fn test_language_endpoints() {
    let ctx = TestContext::new();
    let app = ctx.app();

    let (_, body) = send(&app, Method::GET, "/api/language", None).await;
    assert_eq!(body, json!({ "language": "en", "dir": "ltr" }));

    let (_, body) = send(&app, Method::POST, "/api/language/toggle", None).await;
    assert_eq!(body, json!({ "language": "ar", "dir": "rtl" }));

    let (_, body) = send(&app, Method::GET, "/api/translations", None).await;
    assert_eq!(body["translations"]["cart.whishMoney"], "ويش موني");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/language",
        Some(json!({ "language": "fr" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(
        &app,
        Method::PUT,
        "/api/language",
        Some(json!({ "language": "en" })),
    )
    .await;
    assert_eq!(body["language"], "en");
}

// ============================================================================
// Admin
// ============================================================================

#[tokio::test]
async fn test_admin_gate() {
    let ctx = TestContext::new();
    let app = ctx.app();
    let credentials = json!({ "email": "admin@sts.com", "password": "admin123" });

    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/login?code=WRONG",
        Some(credentials.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/login?code=STS2025",
        Some(json!({ "email": "admin@sts.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, session) = send(
        &app,
        Method::POST,
        "/api/admin/login?code=STS2025",
        Some(credentials),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["email"], "admin@sts.com");

    let (status, dashboard) = send(&app, Method::GET, "/api/admin/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["stats"]["totalProducts"], 10);
    assert_eq!(dashboard["products"].as_array().unwrap().len(), 10);

    let (status, _) = send(&app, Method::POST, "/api/admin/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
