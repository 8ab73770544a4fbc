//! Shared helpers: an in-process backend and request recording.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;

use docrepo_client::{ApiClient, MemoryKeyValueStore};
use docrepo_core::config::api::ApiConfig;

/// Requests seen by the backend, as `"METHOD path?query"` lines or any
/// other string a handler chooses to record.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    /// Record one entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("lock").push(entry.into());
    }

    /// Snapshot of everything recorded.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("lock").clone()
    }

    /// Number of recorded entries starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

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

/// Serve `router` and record every request line into `recorder`.
pub async fn spawn_recorded(router: Router, recorder: &Recorder) -> String {
    let recorder = recorder.clone();
    let router = router.layer(axum::middleware::from_fn(
        move |req: axum::extract::Request, next: axum::middleware::Next| {
            let recorder = recorder.clone();
            async move {
                let line = match req.uri().query() {
                    Some(q) => format!("{} {}?{}", req.method(), req.uri().path(), q),
                    None => format!("{} {}", req.method(), req.uri().path()),
                };
                recorder.push(line);
                next.run(req).await
            }
        },
    ));
    spawn(router).await
}

/// Client against `base_url` with an in-memory store and a token set.
pub async fn client(base_url: &str) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config, Arc::new(MemoryKeyValueStore::new()))
        .await
        .expect("Failed to build client");
    client.set_token("test-token").await.expect("set token");
    client
}

/// JSON of a user record that signed in `days_ago` days ago.
pub fn user_json(email: &str, sign_ins: u64, days_ago: Option<i64>) -> serde_json::Value {
    let last = days_ago.map(|d| (chrono::Utc::now() - chrono::Duration::days(d)).to_rfc3339());
    serde_json::json!({
        "_id": format!("id-{email}"),
        "email": email,
        "fullname": email,
        "role": "user",
        "numberOfSignIns": sign_ins,
        "lastSignIn": last.unwrap_or_else(|| "Never".to_string()),
    })
}
