//! Page controllers and the health monitor wired to a mock backend.

mod common;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use client::controllers::{
    CHAT_FALLBACK_REPLY, ChatController, LoginController, RevenueController, RevenueField,
};
use client::{ApiClient, HealthMonitor, MarketMindApi, SessionStore, SubmitError};
use common::{MockBackend, closed_addr, config_for};
use serde_json::{Value, json};
use shared::models::{ChatRole, HealthStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::timeout;

fn simulation() -> Value {
    json!({
        "current_performance": {"leads": 250, "revenue": 12500, "roas": 12.5},
        "projections": [
            {"month": "Jan", "revenue": 1000, "growth": "5%"},
            {"month": "Feb", "revenue": 1050, "growth": "5%"}
        ],
        "graph_data": {
            "labels": ["Jan", "Feb"],
            "datasets": [{"label": "Revenue", "data": [1000, 1050]}]
        }
    })
}

#[tokio::test]
async fn test_revenue_export_after_simulation() {
    let router = Router::new().route(
        "/api/revenue/simulate",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["ad_spend"], 2000.0);
            Json(simulation())
        }),
    );
    let backend = MockBackend::start(router).await;
    let page = RevenueController::new(Arc::new(backend.client()));

    page.set_field(RevenueField::AdSpend, "2000");
    page.simulate().await.expect("simulation");

    let csv = page.export_csv().expect("csv");
    assert_eq!(csv, "Month,Revenue,Growth\nJan,1000,5%\nFeb,1050,5%");
    assert_eq!(csv.lines().nth(1), Some("Jan,1000,5%"));
    assert_eq!(page.chart().len(), 2);
    backend.stop().await;
}

#[tokio::test]
async fn test_chat_transcript_with_backend_down() {
    let api = Arc::new(ApiClient::new(&config_for(closed_addr().await)).expect("client"));
    let chat = ChatController::new(api);

    let reply = chat.send("Is anyone there?").await.expect("accepted");
    assert_eq!(reply.content, CHAT_FALLBACK_REPLY);

    let transcript = chat.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].role, ChatRole::User);
    assert_eq!(transcript[2].role, ChatRole::Assistant);
}

#[tokio::test]
async fn test_double_submit_is_rejected() {
    let gate = Arc::new(Notify::new());
    let router = Router::new()
        .route(
            "/api/chat/send",
            post(|State(gate): State<Arc<Notify>>| async move {
                gate.notified().await;
                Json(json!({"response": "done"}))
            }),
        )
        .with_state(gate.clone());
    let backend = MockBackend::start(router).await;
    let chat = Arc::new(ChatController::new(Arc::new(backend.client())));

    let first = {
        let chat = chat.clone();
        tokio::spawn(async move { chat.send("first").await })
    };
    while !chat.is_waiting() {
        tokio::task::yield_now().await;
    }

    assert_eq!(chat.send("second").await, Err(SubmitError::Busy));
    assert_eq!(chat.transcript().len(), 2);

    gate.notify_one();
    let reply = first.await.expect("join").expect("reply");
    assert_eq!(reply.content, "done");
    assert_eq!(chat.transcript().len(), 3);
    backend.stop().await;
}

#[tokio::test]
async fn test_login_populates_session() {
    let router = Router::new().route(
        "/api/login",
        post(|Json(body): Json<Value>| async move {
            if body["password"] == "admin123" {
                (
                    StatusCode::OK,
                    Json(json!({
                        "user": {"username": "admin", "name": "Admin User"},
                        "token": "abc123"
                    })),
                )
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Invalid credentials"})),
                )
            }
        }),
    );
    let backend = MockBackend::start(router).await;
    let session = Arc::new(SessionStore::new());
    let page = LoginController::new(Arc::new(backend.client()), session.clone());

    let err = page.login("admin", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!session.is_authenticated());

    page.login("admin", "admin123").await.expect("login");
    assert_eq!(session.current_token().as_deref(), Some("abc123"));
    assert_eq!(
        session.current_user().map(|user| user.name),
        Some("Admin User".to_string())
    );
    backend.stop().await;
}

#[tokio::test]
async fn test_health_monitor_tracks_backend() {
    let backend = MockBackend::start(
        Router::new().route("/", get(|| async { Json(json!({"status": "active"})) })),
    )
    .await;
    let api: Arc<dyn MarketMindApi> = Arc::new(backend.client());
    let monitor = HealthMonitor::spawn(api, Duration::from_millis(50));
    let mut status = monitor.subscribe();

    timeout(
        Duration::from_secs(5),
        status.wait_for(|s| *s == HealthStatus::Online),
    )
    .await
    .expect("online in time")
    .expect("monitor alive");
    assert_eq!(monitor.status().label(), Some("System Online"));

    backend.stop().await;
    timeout(
        Duration::from_secs(5),
        status.wait_for(|s| *s == HealthStatus::Offline),
    )
    .await
    .expect("offline in time")
    .expect("monitor alive");
    assert_eq!(monitor.status().label(), Some("Backend Offline"));

    monitor.shutdown().await;
}
