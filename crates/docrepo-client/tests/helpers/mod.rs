//! Shared helpers: an in-process HTTP backend and client constructors.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::HeaderMap;

use docrepo_client::{ApiClient, MemoryKeyValueStore};
use docrepo_core::config::api::ApiConfig;
use docrepo_core::traits::store::KeyValueStore;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test backend stopped");
    });
    format!("http://{addr}")
}

/// Client against `base_url` backed by a fresh in-memory store.
pub async fn client(base_url: &str) -> ApiClient {
    client_with_store(base_url, Arc::new(MemoryKeyValueStore::new())).await
}

/// Client against `base_url` backed by `store`.
pub async fn client_with_store(base_url: &str, store: Arc<dyn KeyValueStore>) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    };
    ApiClient::new(&config, store)
        .await
        .expect("Failed to build client")
}

/// Values captured by a handler for later assertions.
pub type Captured = Arc<Mutex<Vec<String>>>;

/// Create an empty capture list.
pub fn captured() -> Captured {
    Arc::new(Mutex::new(Vec::new()))
}

/// The `Authorization` header, or `"<none>"`.
pub fn auth_header(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("<none>")
        .to_string()
}

/// The `Content-Type` header, or `"<none>"`.
pub fn content_type(headers: &HeaderMap) -> String {
    headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("<none>")
        .to_string()
}

/// JSON of a minimal user record.
pub fn user_json(email: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": format!("id-{email}"),
        "email": email,
        "fullname": "Test User",
        "role": role,
        "numberOfSignIns": 3,
        "lastSignIn": "Never",
    })
}
