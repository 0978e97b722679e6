//! Shared plumbing for the store integration tests: a loopback axum mock
//! backend and JSON builders for the backend's wire shapes.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};

use waveline_api::{ApiClient, ApiConfig};

/// Serve `router` on an ephemeral loopback port, returning the base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn api_for(base_url: &str) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(ApiConfig::with_base_url(base_url)))
}

pub fn user_json(two_factor_enabled: bool) -> Value {
    json!({
        "id": "u1",
        "name": "Ada",
        "email": "ada@example.com",
        "twoFactorEnabled": two_factor_enabled
    })
}

pub fn auth_json(token: &str, two_factor_enabled: bool) -> Value {
    json!({ "token": token, "user": user_json(two_factor_enabled) })
}

pub fn contact_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "phoneNumber": "+15550100" })
}

pub fn sent_json(id: &str) -> Value {
    json!({
        "id": id,
        "contact": "c1",
        "message": "hello",
        "count": 1,
        "sentAt": "2026-08-01T10:00:00Z",
        "status": "sent"
    })
}

pub fn scheduled_json(id: &str) -> Value {
    json!({
        "id": id,
        "contact": "c1",
        "message": "hello",
        "count": 1,
        "status": "pending",
        "scheduledFor": "2026-09-01T14:30:00Z"
    })
}
