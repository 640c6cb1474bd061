use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use cronos_sdk::client::{ClientError, CronosClient};
use cronos_sdk::objects::{
    CreateOrderRequest, DeliveryMethod, LoginRequest, OrderItemRequest, OrderStatus, Role,
};
use serde_json::{Value, json};
use url::Url;

/// Requests seen by the mock API: `(path, authorization header, json body)`.
#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(String, Option<String>, Value)>>>);

impl Seen {
    fn record(&self, path: &str, headers: &HeaderMap, body: Value) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.0.lock().unwrap().push((path.to_owned(), auth, body));
    }

    fn take(&self) -> Vec<(String, Option<String>, Value)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

async fn login(
    State(seen): State<Seen>,
    Path(role): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    seen.record(&format!("/auth/login/{role}"), &headers, body);
    Json(json!({
        "user": {"id": 9, "name": "Budi", "email": "budi@example.com"},
        "token": "tok-123"
    }))
}

async fn create_order(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    seen.record("/orders", &headers, body);
    Json(json!({
        "order": {"id": 42, "konsumen_id": 9, "status": "PENDING", "total_harga": 116000}
    }))
}

async fn scan_receive(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let token = body["qr_token"].as_str().unwrap_or_default().to_owned();
    seen.record("/orders/scan/receive", &headers, body);
    if token == "RCV-OK" {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Token QR tidak valid"})),
        )
            .into_response()
    }
}

async fn report() -> impl IntoResponse {
    ([("content-type", "application/pdf")], b"%PDF-1.4 mock".to_vec())
}

async fn messages(Path((role, id)): Path<(String, i64)>) -> impl IntoResponse {
    Json(json!([{
        "id": 1, "sender_id": id, "sender_role": role,
        "receiver_id": 9, "receiver_role": "konsumen",
        "content": "Stok masih ada", "is_read": true,
        "created_at": "2024-05-01T08:30:00Z"
    }]))
}

async fn spawn_api() -> anyhow::Result<(Url, Seen)> {
    let seen = Seen::default();
    let api = Router::new()
        .route("/auth/login/{role}", post(login))
        .route("/orders", post(create_order))
        .route("/orders/scan/receive", post(scan_receive))
        .route("/reports/admin", get(report))
        .route("/chat/messages/{role}/{id}", get(messages))
        .with_state(seen.clone());
    let router = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok((Url::parse(&format!("http://{addr}/api"))?, seen))
}

#[tokio::test]
async fn login_posts_to_role_path_without_token() -> anyhow::Result<()> {
    let (base, seen) = spawn_api().await?;
    let client = CronosClient::new(base);

    let auth = client
        .login(
            Role::Konsumen,
            &LoginRequest {
                email: "budi@example.com".into(),
                password: "rahasia".into(),
            },
        )
        .await?;

    assert_eq!(auth.token, "tok-123");
    assert_eq!(auth.user.id, 9);
    let requests = seen.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "/auth/login/konsumen");
    assert_eq!(requests[0].1, None);
    assert_eq!(requests[0].2["email"], "budi@example.com");
    Ok(())
}

#[tokio::test]
async fn create_order_carries_bearer_token_and_wire_shape() -> anyhow::Result<()> {
    let (base, seen) = spawn_api().await?;
    let client = CronosClient::new(base).with_token("tok-123");

    let created = client
        .create_order(&CreateOrderRequest {
            items: vec![OrderItemRequest {
                produk_id: 7,
                qty: 2,
            }],
            delivery_method: Some(DeliveryMethod::LogisticPartner),
            delivery_address: Some("Jl. Raya No. 1".into()),
            delivery_note: None,
            insurance: Some(true),
        })
        .await?;

    assert_eq!(created.order.id, 42);
    assert_eq!(created.order.status, OrderStatus::Pending);
    let requests = seen.take();
    assert_eq!(requests[0].1.as_deref(), Some("Bearer tok-123"));
    assert_eq!(
        requests[0].2,
        json!({
            "items": [{"produk_id": 7, "qty": 2}],
            "delivery_method": "LOGISTIC_PARTNER",
            "delivery_address": "Jl. Raya No. 1",
            "insurance": true
        })
    );
    Ok(())
}

#[tokio::test]
async fn scan_receive_accepts_empty_ack_and_surfaces_server_message() -> anyhow::Result<()> {
    let (base, seen) = spawn_api().await?;
    let client = CronosClient::new(base).with_token("tok-123");

    let ack = client.scan_receive("RCV-OK").await?;
    assert_eq!(ack.message, None);

    let err = client.scan_receive("RCV-BAD").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status, .. } if status == StatusCode::BAD_REQUEST));
    assert_eq!(err.user_message("Gagal konfirmasi"), "Token QR tidak valid");

    let requests = seen.take();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].2, json!({"qr_token": "RCV-BAD"}));
    Ok(())
}

#[tokio::test]
async fn admin_report_returns_raw_bytes() -> anyhow::Result<()> {
    let (base, _seen) = spawn_api().await?;
    let client = CronosClient::new(base).with_token("admin-token");

    let pdf = client.admin_report().await?;
    assert!(pdf.starts_with(b"%PDF"));
    Ok(())
}

#[tokio::test]
async fn messages_path_uses_role_then_id() -> anyhow::Result<()> {
    let (base, _seen) = spawn_api().await?;
    let client = CronosClient::new(base).with_token("tok-123");

    let thread = client
        .messages_with(cronos_sdk::objects::Participant::new(Role::Petambak, 3))
        .await?;
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].sender_role, Role::Petambak);
    assert_eq!(thread[0].sender_id, 3);
    Ok(())
}

#[tokio::test]
async fn unknown_endpoint_maps_to_api_error() -> anyhow::Result<()> {
    let (base, _seen) = spawn_api().await?;
    let client = CronosClient::new(base);

    let err = client.my_orders().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status, .. } if status == StatusCode::NOT_FOUND));
    assert_eq!(err.user_message("Gagal memuat pesanan"), "Gagal memuat pesanan");
    Ok(())
}
