use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use storefront_app::Storefront;
use storefront_core::app_config::Config;
use storefront_core::{DisplaySurface, RecordingSurface, StatusKind};
use storefront_order::{HttpOrderGateway, OrderError, SubmitterState};

type Received = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn accept(
    State(received): State<Received>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    received.lock().unwrap().push((content_type, body));
    (StatusCode::CREATED, Json(json!({ "orderId": "ORD-1" })))
}

async fn out_of_stock(
    State(received): State<Received>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    received.lock().unwrap().push((None, body));
    (StatusCode::CONFLICT, Json(json!({ "error": "Out of stock" })))
}

async fn not_json() -> impl IntoResponse {
    (StatusCode::OK, "<html>maintenance</html>")
}

/// Serve `router` on an ephemeral port; returns the order URL.
async fn spawn_endpoint(router: Router<Received>) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = router.with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/orders", addr), received)
}

fn storefront(url: &str) -> (Arc<RecordingSurface>, Storefront) {
    let mut config = Config::default();
    config.endpoint.url = url.to_string();

    // Local endpoints only; keep ambient proxy settings out of the way
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let surface = Arc::new(RecordingSurface::new("Place Order"));
    let gateway = Arc::new(HttpOrderGateway::new(client, &config.endpoint.url));
    let storefront = Storefront::new(&config, surface.clone(), gateway);
    (surface, storefront)
}

fn last_status(surface: &RecordingSurface) -> (String, StatusKind) {
    let status = surface.snapshot().status_history.last().cloned().unwrap();
    (status.text, status.kind)
}

#[tokio::test]
async fn test_order_placed_over_http() {
    let (url, received) = spawn_endpoint(Router::new().route("/orders", post(accept))).await;
    let (surface, storefront) = storefront(&url);

    storefront.add_to_cart("Widget", Decimal::new(999, 2)).await.unwrap();
    surface.set_customer_name("Ada");

    let order_id = storefront.place_order().await.unwrap();
    assert_eq!(order_id, "ORD-1");

    let (text, kind) = last_status(&surface);
    assert!(text.contains("ORD-1"));
    assert_eq!(kind, StatusKind::Success);
    assert!(storefront.cart().read().await.is_empty());
    assert_eq!(surface.customer_name(), "");
    assert!(surface.snapshot().cart.unwrap().is_empty());

    let received = received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    let (content_type, body) = &received[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        &json!({
            "customerName": "Ada",
            "items": [{ "name": "Widget", "price": 9.99 }],
            "totalAmount": 9.99
        })
    );
}

#[tokio::test]
async fn test_rejected_order_keeps_cart() {
    let (url, received) = spawn_endpoint(Router::new().route("/orders", post(out_of_stock))).await;
    let (surface, storefront) = storefront(&url);

    storefront.add_to_cart("Widget", Decimal::new(999, 2)).await.unwrap();
    surface.set_customer_name("Ada");

    let result = storefront.place_order().await;

    assert!(matches!(result, Err(OrderError::Application { status: 409, .. })));
    let (text, kind) = last_status(&surface);
    assert!(text.contains("Out of stock"));
    assert_eq!(kind, StatusKind::Error);

    let cart = storefront.cart();
    let cart = cart.read().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].name, "Widget");
    assert_eq!(surface.customer_name(), "Ada");
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_keeps_cart_and_reenables_submit() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (surface, storefront) = storefront(&format!("http://{}/orders", addr));
    storefront.add_to_cart("Widget", Decimal::new(999, 2)).await.unwrap();
    surface.set_customer_name("Ada");

    let result = storefront.place_order().await;

    let description = match result {
        Err(OrderError::Transport(description)) => description,
        other => panic!("expected transport error, got {:?}", other),
    };
    let (text, kind) = last_status(&surface);
    assert_eq!(text, format!("❌ Error: {}", description));
    assert_eq!(kind, StatusKind::Error);

    assert_eq!(storefront.cart().read().await.len(), 1);
    let state = surface.snapshot();
    assert!(state.submit_enabled);
    assert_eq!(state.submit_label, "Place Order");
    assert_eq!(storefront.state(), SubmitterState::Idle);
}

#[tokio::test]
async fn test_non_json_reply_is_transport_error() {
    let (url, _received) = spawn_endpoint(Router::new().route("/orders", post(not_json))).await;
    let (surface, storefront) = storefront(&url);

    storefront.add_to_cart("Widget", Decimal::new(999, 2)).await.unwrap();
    surface.set_customer_name("Ada");

    let result = storefront.place_order().await;

    assert!(matches!(result, Err(OrderError::Transport(_))));
    assert_eq!(storefront.cart().read().await.len(), 1);
    assert!(surface.snapshot().submit_enabled);
}

#[tokio::test]
async fn test_validation_failures_never_reach_endpoint() {
    let (url, received) = spawn_endpoint(Router::new().route("/orders", post(accept))).await;
    let (surface, storefront) = storefront(&url);

    surface.set_customer_name("Ada");
    let empty_cart = storefront.place_order().await;
    assert!(matches!(empty_cart, Err(OrderError::Validation(_))));

    storefront.add_to_cart("Widget", Decimal::new(999, 2)).await.unwrap();
    surface.set_customer_name("   ");
    let blank_name = storefront.place_order().await;
    assert!(matches!(blank_name, Err(OrderError::Validation(_))));

    assert!(received.lock().unwrap().is_empty());
    assert_eq!(storefront.cart().read().await.len(), 1);
}
