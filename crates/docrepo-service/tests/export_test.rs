//! Integration tests for user exports.

mod helpers;

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use axum::extract::Query;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use bytes::Bytes;

use docrepo_core::types::{ExportFormat, ExportScope};
use docrepo_service::ExportController;

async fn users_export(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let activity = params.get("activity").cloned().unwrap_or_default();
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from(format!("Email,Status ({activity})\n"))),
        Ok(Bytes::from_static(b"a@corp.com,active\n")),
        Ok(Bytes::from_static(b"b@corp.com,inactive\n")),
    ];
    (
        [(header::CONTENT_TYPE, "text/csv")],
        Body::from_stream(futures::stream::iter(chunks)),
    )
}

async fn controller(recorder: &helpers::Recorder) -> ExportController {
    let router = Router::new().route("/user/admin/users-export", get(users_export));
    let base = helpers::spawn_recorded(router, recorder).await;
    ExportController::new(helpers::client(&base).await)
}

#[tokio::test]
async fn test_selected_export_is_local() {
    let recorder = helpers::Recorder::default();
    let export = controller(&recorder).await;
    let selected = vec!["a@corp.com".to_string(), "b@corp.com".to_string()];

    let blob = export
        .export_scope(ExportScope::Selected, &selected, ExportFormat::Xlsx, None)
        .await
        .expect("export");
    assert_eq!(blob.bytes.as_ref(), b"Email\na@corp.com\nb@corp.com");
    assert_eq!(blob.mime_type, "text/csv");
    assert!(recorder.entries().is_empty());
}

#[tokio::test]
async fn test_streamed_export_reports_progress() {
    let recorder = helpers::Recorder::default();
    let export = controller(&recorder).await;

    let mut progress = Vec::new();
    let mut on_progress = |n: u64| progress.push(n);
    let blob = export
        .export_scope(ExportScope::Active, &[], ExportFormat::Csv, Some(&mut on_progress))
        .await
        .expect("export");

    let text = String::from_utf8(blob.bytes.to_vec()).expect("utf8");
    assert!(text.starts_with("Email,Status (active)\n"));
    assert_eq!(blob.mime_type, "text/csv");
    assert_eq!(progress.last().copied(), Some(blob.size()));
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(
        recorder.entries(),
        vec!["GET /user/admin/users-export?activity=active&format=csv"]
    );
}

#[tokio::test]
async fn test_xlsx_export_uses_spreadsheet_mime() {
    let recorder = helpers::Recorder::default();
    let export = controller(&recorder).await;

    let blob = export
        .export_scope(ExportScope::All, &[], ExportFormat::Xlsx, None)
        .await
        .expect("export");
    assert_eq!(
        blob.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        recorder.entries(),
        vec!["GET /user/admin/users-export?activity=all&format=xlsx"]
    );
}
