//! Integration tests for batch uploads.

mod helpers;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{post, put};
use bytes::Bytes;
use serde_json::{Value, json};

use docrepo_service::browser::IconUpload;
use docrepo_service::upload::{NotificationOutcome, UploadBatch, UploadEntry};

type Reply = Result<Json<Value>, (StatusCode, &'static str)>;

fn host(headers: &HeaderMap) -> String {
    headers
        .get("host")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn upload_url(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let key = body["key"].as_str().unwrap_or_default().replace('/', "_");
    Json(json!({ "url": format!("http://{}//storage//files/{key}", host(&headers)) }))
}

async fn icon_upload_url(headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let item = body["itemPath"].as_str().unwrap_or_default();
    if item.contains("broken") {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "icon bucket missing"));
    }
    let name = item.replace('/', "_");
    let kind = body["iconType"].as_str().unwrap_or_default();
    Ok(Json(json!({
        "uploadUrl": format!("http://{}/storage/icons/{name}?type={kind}", host(&headers))
    })))
}

async fn store_file(Path(name): Path<String>, _body: Bytes) -> Result<StatusCode, (StatusCode, &'static str)> {
    if name.contains("fail") {
        Err((StatusCode::INSUFFICIENT_STORAGE, "disk quota exceeded"))
    } else {
        Ok(StatusCode::OK)
    }
}

async fn notify(recorder: helpers::Recorder, Json(body): Json<Value>) -> Reply {
    recorder.push(format!(
        "notify {} @ {}",
        body["fileNames"].as_str().unwrap_or_default(),
        body["folderPath"].as_str().unwrap_or_default()
    ));
    if body["folderPath"] == "quiet" {
        Err((StatusCode::BAD_GATEWAY, "mailer down"))
    } else {
        Ok(Json(json!({ "message": "Notified" })))
    }
}

async fn client(recorder: &helpers::Recorder) -> docrepo_client::ApiClient {
    let notes = recorder.clone();
    let router = Router::new()
        .route("/api/files/upload", post(upload_url))
        .route("/api/icons/upload", post(icon_upload_url))
        .route("/storage/files/{name}", put(store_file))
        .route("/storage/icons/{name}", put(|_body: Bytes| async { StatusCode::OK }))
        .route(
            "/api/notifications/upload",
            post(move |body: Json<Value>| notify(notes.clone(), body)),
        );
    let base = helpers::spawn_recorded(router, recorder).await;
    helpers::client(&base).await
}

fn entry(name: &str) -> UploadEntry {
    UploadEntry {
        file_name: name.to_string(),
        content_type: "text/plain".to_string(),
        bytes: Bytes::from(format!("content of {name}")),
        icon: None,
    }
}

fn icon() -> IconUpload {
    IconUpload::new("i.png", "image/png", Bytes::from_static(b"png"), 1024).expect("icon")
}

#[tokio::test]
async fn test_batch_uploads_in_order_and_notifies() {
    let recorder = helpers::Recorder::default();
    let client = client(&recorder).await;

    let mut batch = UploadBatch::new();
    batch.push(entry("a.txt").with_icon(icon()));
    batch.push(entry("broken.txt").with_icon(icon()));
    let report = batch.upload_all(&client, "hr/", true).await.expect("batch");

    assert_eq!(report.uploaded, vec!["hr/a.txt", "hr/broken.txt"]);
    assert_eq!(report.icon_failures.len(), 1);
    assert_eq!(report.icon_failures[0].0, "broken.txt");
    assert_eq!(report.notification, NotificationOutcome::Sent);

    let puts: Vec<_> = recorder
        .entries()
        .into_iter()
        .filter(|e| e.starts_with("PUT "))
        .collect();
    assert_eq!(
        puts,
        vec![
            "PUT /storage/files/hr_a.txt",
            "PUT /storage/icons/hr_a.txt?type=png",
            "PUT /storage/files/hr_broken.txt",
        ]
    );
    assert_eq!(recorder.count("notify a.txt, broken.txt @ hr/"), 1);
}

#[tokio::test]
async fn test_icon_type_comes_from_icon_extension() {
    let recorder = helpers::Recorder::default();
    let client = client(&recorder).await;

    let webp = IconUpload::new("badge.webp", "image/webp", Bytes::from_static(b"webp"), 1024)
        .expect("icon");
    let mut batch = UploadBatch::new();
    batch.push(entry("a.txt").with_icon(webp));
    let report = batch.upload_all(&client, "hr", false).await.expect("batch");

    assert!(report.icon_failures.is_empty());
    assert_eq!(recorder.count("PUT /storage/icons/hr_a.txt?type=webp"), 1);
}

#[tokio::test]
async fn test_failed_file_aborts_batch() {
    let recorder = helpers::Recorder::default();
    let client = client(&recorder).await;

    let mut batch = UploadBatch::new();
    batch.push(entry("ok.txt"));
    batch.push(entry("fail.txt"));
    batch.push(entry("later.txt"));
    let err = batch.upload_all(&client, "", true).await.expect_err("aborted");

    assert_eq!(err.message, "Failed to upload fail.txt: disk quota exceeded");
    assert_eq!(recorder.count("PUT /storage/files/ok.txt"), 1);
    assert_eq!(recorder.count("PUT /storage/files/later.txt"), 0);
    assert_eq!(recorder.count("POST /api/notifications/upload"), 0);
}

#[tokio::test]
async fn test_notification_failure_is_not_fatal() {
    let recorder = helpers::Recorder::default();
    let client = client(&recorder).await;

    let mut batch = UploadBatch::new();
    batch.push(entry("a.txt"));
    let report = batch.upload_all(&client, "quiet", true).await.expect("batch");
    assert_eq!(report.uploaded, vec!["quiet/a.txt"]);
    assert_eq!(
        report.notification,
        NotificationOutcome::Failed("mailer down".to_string())
    );

    let report = batch.upload_all(&client, "", true).await.expect("batch");
    assert_eq!(report.notification, NotificationOutcome::Sent);
    assert_eq!(recorder.count("notify a.txt @ Root"), 1);

    let report = batch.upload_all(&client, "", false).await.expect("batch");
    assert_eq!(report.notification, NotificationOutcome::Skipped);
}

#[tokio::test]
async fn test_empty_batch_sends_nothing() {
    let recorder = helpers::Recorder::default();
    let client = client(&recorder).await;

    let report = UploadBatch::new()
        .upload_all(&client, "hr", true)
        .await
        .expect("empty");
    assert!(report.uploaded.is_empty());
    assert_eq!(report.notification, NotificationOutcome::Skipped);
    assert!(recorder.entries().is_empty());
}
