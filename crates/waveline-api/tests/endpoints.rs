//! Endpoint wrappers exercised against a loopback mock backend.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use waveline_api::{ApiClient, ApiConfig};

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
struct Hit {
    path: String,
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct MockState {
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl MockState {
    fn record(&self, path: &str, headers: &HeaderMap, body: Value) {
        self.hits.lock().unwrap().push(Hit {
            path: path.to_string(),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(String::from),
            body,
        });
    }

    fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(ApiConfig::with_base_url(base_url))
}

fn auth_response() -> Value {
    json!({
        "token": "tok-1",
        "user": {
            "id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "twoFactorEnabled": false
        }
    })
}

#[tokio::test]
async fn login_parses_token_and_user_and_sends_no_bearer() {
    let state = MockState::default();
    let router = Router::new()
        .route(
            "/api/auth/login",
            post(
                |State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    state.record("/api/auth/login", &headers, body);
                    Json(auth_response())
                },
            ),
        )
        .with_state(state.clone());
    let base = spawn(router).await;

    let client = client_for(&base);
    let resp = client.login("ada@example.com", "hunter2").await.unwrap();

    assert_eq!(resp.token, "tok-1");
    assert_eq!(resp.user.name, "Ada");

    let hits = state.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].authorization, None);
    assert_eq!(hits[0].body["email"], "ada@example.com");
    assert_eq!(hits[0].body["password"], "hunter2");
}

#[tokio::test]
async fn backend_error_message_is_surfaced_verbatim() {
    let router = Router::new().route(
        "/api/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid credentials" })),
            )
        }),
    );
    let base = spawn(router).await;

    let err = client_for(&base)
        .login("ada@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.backend_message(), Some("Invalid credentials"));
}

#[tokio::test]
async fn undecodable_error_body_falls_back_to_operation_message() {
    let router = Router::new().route(
        "/api/auth/login",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    );
    let base = spawn(router).await;

    let err = client_for(&base)
        .login("ada@example.com", "hunter2")
        .await
        .unwrap_err();
    assert_eq!(err.backend_message(), Some("Failed to log in"));
}

#[tokio::test]
async fn authenticated_calls_carry_the_bearer_token() {
    let state = MockState::default();
    let router = Router::new()
        .route(
            "/api/whatsapp/contacts",
            get(|State(state): State<MockState>, headers: HeaderMap| async move {
                state.record("/api/whatsapp/contacts", &headers, Value::Null);
                Json(json!([]))
            }),
        )
        .with_state(state.clone());
    let base = spawn(router).await;

    let client = client_for(&base);
    client.set_token("tok-xyz");
    let contacts = client.contacts().await.unwrap();
    assert!(contacts.is_empty());

    let hits = state.hits();
    assert_eq!(hits[0].authorization.as_deref(), Some("Bearer tok-xyz"));
}

#[tokio::test]
async fn schedule_payload_uses_camel_case_scheduled_for() {
    let state = MockState::default();
    let router = Router::new()
        .route(
            "/api/whatsapp/schedule",
            post(
                |State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    state.record("/api/whatsapp/schedule", &headers, body);
                    Json(json!({ "success": true, "message": "queued", "messageId": "m9" }))
                },
            ),
        )
        .with_state(state.clone());
    let base = spawn(router).await;

    let client = client_for(&base);
    client.set_token("tok");
    let when = Utc.with_ymd_and_hms(2026, 9, 1, 14, 30, 0).unwrap();
    let receipt = client
        .schedule_message("c1", "hello", 2, when)
        .await
        .unwrap();
    assert_eq!(receipt.message_id, "m9");

    let body = &state.hits()[0].body;
    assert_eq!(body["contact"], "c1");
    assert_eq!(body["count"], 2);
    assert!(body.get("scheduledFor").is_some());
    assert!(body.get("scheduled_for").is_none());
}

#[tokio::test]
async fn cancel_issues_delete_on_the_scheduled_id() {
    let state = MockState::default();
    let router = Router::new()
        .route(
            "/api/whatsapp/scheduled/:id",
            delete(
                |State(state): State<MockState>, Path(id): Path<String>, headers: HeaderMap| async move {
                    state.record(&format!("/api/whatsapp/scheduled/{id}"), &headers, Value::Null);
                    Json(json!({ "success": true, "message": "cancelled" }))
                },
            ),
        )
        .with_state(state.clone());
    let base = spawn(router).await;

    let client = client_for(&base);
    client.set_token("tok");
    let ack = client.cancel_scheduled("m42").await.unwrap();
    assert!(ack.success);

    assert_eq!(state.hits()[0].path, "/api/whatsapp/scheduled/m42");
}
