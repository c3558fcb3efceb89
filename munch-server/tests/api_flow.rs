//! End-to-end order flow through the HTTP router.
//!
//! Drives the real axum app with in-process requests: catalog setup, cart
//! building, checkout, and the full staff/customer status lifecycle.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tower::ServiceExt;

use munch_server::core::server::build_app;
use munch_server::{CartStore, Config, ServerState};

async fn test_app() -> Router {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let mut config = Config::with_overrides(":memory:", 0);
    config.delivery_fee = 50.0;

    let state = ServerState {
        config,
        pool,
        carts: CartStore::new(50.0),
    };
    build_app(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn seed_catalog(app: &Router) -> (String, String) {
    let (status, category) = send(
        app,
        "POST",
        "/api/categories",
        Some(json!({ "category_name": "Mains", "description": "Rice meals" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category["category_id"], "CAT01");

    for (name, price) in [("Chicken Adobo", 200.0), ("Garlic Rice", 100.0)] {
        let (status, _) = send(
            app,
            "POST",
            "/api/menu",
            Some(json!({
                "category_id": "CAT01",
                "item_name": name,
                "price": price,
                "is_available": true,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, customer) = send(
        app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "Maria Santos", "phone": "09171234567", "address": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, staff) = send(app, "POST", "/api/staffs", Some(json!({ "name": "Juan Cruz" }))).await;
    assert_eq!(status, StatusCode::OK);

    (
        customer["customer_id"].as_str().unwrap().to_string(),
        staff["staff_id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn full_order_lifecycle() {
    let app = test_app().await;
    let (customer_id, staff_id) = seed_catalog(&app).await;
    assert_eq!(customer_id, "C001");
    assert_eq!(staff_id, "S001");

    // Build a cart: MENU1 ×2, MENU2 ×1
    let (status, session) = send(&app, "POST", "/api/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    let session_id = session["session_id"].as_str().unwrap().to_string();

    for menu_id in ["MENU1", "MENU1", "MENU2"] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/cart/{session_id}/items"),
            Some(json!({ "menu_id": menu_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, summary) = send(&app, "GET", &format!("/api/cart/{session_id}"), None).await;
    assert_eq!(summary["item_count"], 2); // aggregated, not 3 lines
    assert_eq!(summary["lines"][0]["quantity"], 2);
    assert_eq!(summary["subtotal"], 500.0);
    assert_eq!(summary["total"], 550.0); // no tax in the cart

    // Checkout: subtotal 500 + VAT 60 + delivery 50 = 610
    let (status, placed) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "session_id": session_id,
            "customer_id": customer_id,
            "address": "12 Mabini St, Barangay San Jose, Quezon City",
            "payment_method": "Cash on delivery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = placed["order_id"].as_str().unwrap().to_string();
    assert_eq!(order_id, "O001");

    let (_, detail) = send(&app, "GET", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(detail["order_status"], "Pending");
    assert_eq!(detail["tax"], 60.0);
    assert_eq!(detail["total_fee"], 610.0);
    assert_eq!(detail["lines"].as_array().unwrap().len(), 2);
    assert_eq!(detail["lines"][0]["order_line_id"], "O1L1");

    // Cart was cleared by the successful checkout
    let (_, summary) = send(&app, "GET", &format!("/api/cart/{session_id}"), None).await;
    assert_eq!(summary["is_empty"], true);

    // Staff sees the order in the pending queue and accepts it
    let (_, pending) = send(&app, "GET", "/api/staff-orders/pending", None).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["order_id"], order_id);
    assert_eq!(pending[0]["items"], "Chicken Adobo (2), Garlic Rice (1)");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/staff-orders/{order_id}/accept"),
        Some(json!({ "staff_id": staff_id, "notes": "On it" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Customer can no longer cancel a Preparing order
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/cancel"),
        Some(json!({ "customer_id": customer_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Staff moves it out for delivery; customer confirms receipt
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/staff-orders/{order_id}/status"),
        Some(json!({ "staff_id": staff_id, "status": "Out for delivery" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/confirm-delivery"),
        Some(json!({ "customer_id": customer_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Trail: Confirmed → Preparing → Out for delivery → Delivered
    let (_, tracks) = send(&app, "GET", &format!("/api/orders/{order_id}/tracks"), None).await;
    let tracks = tracks.as_array().unwrap();
    assert_eq!(tracks.len(), 4);
    assert_eq!(tracks[0]["status"], "Confirmed");
    assert_eq!(tracks[3]["status"], "Delivered");
    assert_eq!(tracks[3]["notes"], "Confirmed by customer");

    let (_, detail) = send(&app, "GET", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(detail["order_status"], "Delivered");

    // History, audit log and dashboard all reflect the delivered order
    let (_, history) = send(
        &app,
        "GET",
        &format!("/api/orders?customer_id={customer_id}"),
        None,
    )
    .await;
    assert_eq!(history[0]["total_fee"], 610.0);
    assert_eq!(history[0]["payment_method"], "Cash on delivery");

    let (_, log) = send(
        &app,
        "GET",
        &format!("/api/activity-log?staff_id={staff_id}"),
        None,
    )
    .await;
    assert_eq!(log.as_array().unwrap().len(), 2); // accept + status update

    let (_, stats) = send(&app, "GET", "/api/statistics/summary", None).await;
    assert_eq!(stats["delivered_orders"], 1);
    assert_eq!(stats["total_revenue"], 610.0);
}

#[tokio::test]
async fn checkout_rejections_keep_the_cart() {
    let app = test_app().await;
    let (customer_id, _) = seed_catalog(&app).await;

    let (_, session) = send(&app, "POST", "/api/cart", None).await;
    let session_id = session["session_id"].as_str().unwrap().to_string();

    // Empty cart
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "session_id": session_id,
            "customer_id": customer_id,
            "address": "12 Mabini St, Barangay San Jose, Quezon City",
            "payment_method": "Cash on delivery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    let (_, _) = send(
        &app,
        "POST",
        &format!("/api/cart/{session_id}/items"),
        Some(json!({ "menu_id": "MENU1" })),
    )
    .await;

    // Short address
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "session_id": session_id,
            "customer_id": customer_id,
            "address": "here",
            "payment_method": "Cash on delivery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Card payment without a card number
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "session_id": session_id,
            "customer_id": customer_id,
            "address": "12 Mabini St, Barangay San Jose, Quezon City",
            "payment_method": "Credit Card",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Cart untouched by all three failures
    let (_, summary) = send(&app, "GET", &format!("/api/cart/{session_id}"), None).await;
    assert_eq!(summary["is_empty"], false);
    assert_eq!(summary["item_count"], 1);

    // No orders were created
    let (_, stats) = send(&app, "GET", "/api/statistics/summary", None).await;
    assert_eq!(stats["total_orders"], 0);
}

#[tokio::test]
async fn cart_sessions_do_not_bleed() {
    let app = test_app().await;
    seed_catalog(&app).await;

    let (_, a) = send(&app, "POST", "/api/cart", None).await;
    let (_, b) = send(&app, "POST", "/api/cart", None).await;
    let a_id = a["session_id"].as_str().unwrap();
    let b_id = b["session_id"].as_str().unwrap();

    send(
        &app,
        "POST",
        &format!("/api/cart/{a_id}/items"),
        Some(json!({ "menu_id": "MENU1" })),
    )
    .await;

    let (_, a_summary) = send(&app, "GET", &format!("/api/cart/{a_id}"), None).await;
    let (_, b_summary) = send(&app, "GET", &format!("/api/cart/{b_id}"), None).await;
    assert_eq!(a_summary["item_count"], 1);
    assert_eq!(b_summary["is_empty"], true);

    // Unknown sessions 404
    let (status, _) = send(&app, "GET", "/api/cart/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unavailable_items_cannot_enter_a_cart() {
    let app = test_app().await;
    seed_catalog(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/menu/MENU2",
        Some(json!({ "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, session) = send(&app, "POST", "/api/cart", None).await;
    let session_id = session["session_id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/cart/{session_id}/items"),
        Some(json!({ "menu_id": "MENU2" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");
}
