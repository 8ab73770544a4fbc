//! Integration tests for the API client against an in-process backend.

mod helpers;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::json;

use docrepo_client::{FileKeyValueStore, UsersMetricsQuery};
use docrepo_core::error::ErrorKind;
use docrepo_core::traits::store::{AUTH_TOKEN_KEY, KeyValueStore, USER_DATA_KEY};
use docrepo_core::types::ActivityFilter;

fn signin_router() -> Router {
    Router::new().route(
        "/user/signin",
        post(|Json(body): Json<serde_json::Value>| async move {
            if body["password"] == "secret" {
                Ok(Json(json!({
                    "message": "Signed in",
                    "token": "tok-1",
                    "user": helpers::user_json("ann@corp.com", "admin"),
                })))
            } else {
                Err((StatusCode::UNAUTHORIZED, "Invalid credentials"))
            }
        }),
    )
}

#[tokio::test]
async fn test_sign_in_attaches_bearer_token() {
    let seen = helpers::captured();
    let seen_in = seen.clone();
    let router = signin_router().route(
        "/user/bookmarks",
        get(move |headers: HeaderMap| {
            let seen = seen_in.clone();
            async move {
                seen.lock().expect("lock").push(helpers::auth_header(&headers));
                Json(json!({ "bookmarks": [] }))
            }
        }),
    );
    let base = helpers::spawn(router).await;
    let client = helpers::client(&base).await;

    client.bookmarks().await.expect("anonymous call");
    let auth = client.sign_in("ann@corp.com", "secret").await.expect("sign in");
    assert_eq!(auth.token, "tok-1");
    assert!(auth.user.is_admin());
    client.bookmarks().await.expect("authorized call");

    assert_eq!(*seen.lock().expect("lock"), vec!["<none>", "Bearer tok-1"]);
}

#[tokio::test]
async fn test_failed_sign_in_surfaces_body_and_keeps_state() {
    let base = helpers::spawn(signin_router()).await;
    let client = helpers::client(&base).await;

    let err = client
        .sign_in("ann@corp.com", "wrong")
        .await
        .expect_err("rejected");
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(err.status(), Some(401));
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_token_survives_restart_and_sign_out_clears_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    let base = helpers::spawn(signin_router()).await;

    let client = helpers::client_with_store(&base, Arc::new(FileKeyValueStore::new(&path))).await;
    client.sign_in("ann@corp.com", "secret").await.expect("sign in");

    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&path));
    let restored = helpers::client_with_store(&base, store.clone()).await;
    assert_eq!(restored.token().await.as_deref(), Some("tok-1"));
    let profile = restored.stored_profile().await.expect("profile").expect("some");
    assert_eq!(profile.email, "ann@corp.com");

    restored.sign_out().await.expect("sign out");
    assert!(!restored.is_authenticated().await);
    assert_eq!(store.get(AUTH_TOKEN_KEY).await.expect("get"), None);
    assert_eq!(store.get(USER_DATA_KEY).await.expect("get"), None);
}

#[tokio::test]
async fn test_error_body_verbatim_or_fallback() {
    let router = Router::new()
        .route(
            "/user/getBiweeklyMetrics",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "metrics store offline") }),
        )
        .route(
            "/user/admin/users-export",
            get(|| async { StatusCode::BAD_GATEWAY }),
        );
    let base = helpers::spawn(router).await;
    let client = helpers::client(&base).await;

    let err = client.biweekly_metrics().await.expect_err("500");
    assert_eq!(err.message, "metrics store offline");
    assert_eq!(err.kind, ErrorKind::ExternalService);

    let err = client
        .users_export(ActivityFilter::All, Default::default())
        .await
        .expect_err("502");
    assert_eq!(err.message, "Export failed");
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_users_metrics_query_string() {
    let seen = helpers::captured();
    let seen_in = seen.clone();
    let router = Router::new().route(
        "/user/admin/users-metrics",
        get(move |RawQuery(query): RawQuery| {
            let seen = seen_in.clone();
            async move {
                seen.lock().expect("lock").push(query.unwrap_or_default());
                Json(json!({
                    "users": [helpers::user_json("bob@corp.com", "user")],
                    "pageInfo": { "nextCursor": "c-2", "hasNextPage": true },
                }))
            }
        }),
    );
    let base = helpers::spawn(router).await;
    let client = helpers::client(&base).await;

    let page = client
        .users_metrics(&UsersMetricsQuery {
            cursor: None,
            limit: Some(20),
            search: Some("bob smith".into()),
            activity: ActivityFilter::Inactive,
        })
        .await
        .expect("page");
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].last_sign_in, None);
    assert!(page.page_info.has_next_page);

    client
        .users_metrics(&UsersMetricsQuery {
            cursor: Some("c-2".into()),
            ..Default::default()
        })
        .await
        .expect("page");

    let seen = seen.lock().expect("lock");
    assert_eq!(seen[0], "limit=20&q=bob+smith&activity=inactive");
    assert_eq!(seen[1], "cursor=c-2");
}

#[tokio::test]
async fn test_folder_icon_not_found_is_none() {
    let router = Router::new().route(
        "/api/icons/{path}",
        get(|axum::extract::Path(path): axum::extract::Path<String>| async move {
            if path == "hr/reports" {
                Ok(Json(json!({ "iconUrl": "https://cdn.example/icon.png" })))
            } else {
                Err(StatusCode::NOT_FOUND)
            }
        }),
    );
    let base = helpers::spawn(router).await;
    let client = helpers::client(&base).await;

    assert_eq!(
        client.folder_icon("hr/reports").await.expect("probe").as_deref(),
        Some("https://cdn.example/icon.png")
    );
    assert_eq!(client.folder_icon("finance").await.expect("probe"), None);
}

#[tokio::test]
async fn test_path_segment_calls_send_json_content_type() {
    let seen = helpers::captured();
    let (icon_seen, delete_seen) = (seen.clone(), seen.clone());
    let router = Router::new()
        .route(
            "/api/icons/{path}",
            get(move |headers: HeaderMap| {
                let seen = icon_seen.clone();
                async move {
                    seen.lock().expect("lock").push(helpers::content_type(&headers));
                    Json(json!({ "iconUrl": "https://cdn.example/icon.png" }))
                }
            }),
        )
        .route(
            "/user/bookmarks/{item_id}",
            axum::routing::delete(move |headers: HeaderMap| {
                let seen = delete_seen.clone();
                async move {
                    seen.lock().expect("lock").push(helpers::content_type(&headers));
                    Json(json!({ "message": "Bookmark removed" }))
                }
            }),
        );
    let base = helpers::spawn(router).await;
    let client = helpers::client(&base).await;

    client.folder_icon("hr/reports").await.expect("icon");
    client.remove_bookmark("hr/reports/q1.pdf").await.expect("remove");

    assert_eq!(
        *seen.lock().expect("lock"),
        vec!["application/json", "application/json"]
    );
}

#[tokio::test]
async fn test_presigned_put_has_no_bearer_and_collapsed_path() {
    let seen = helpers::captured();
    let seen_in = seen.clone();
    let router = signin_router().route(
        "/icons/a.png",
        axum::routing::put(move |headers: HeaderMap, body: axum::body::Bytes| {
            let seen = seen_in.clone();
            async move {
                let mut seen = seen.lock().expect("lock");
                seen.push(helpers::auth_header(&headers));
                seen.push(String::from_utf8_lossy(&body).into_owned());
                StatusCode::OK
            }
        }),
    );
    let base = helpers::spawn(router).await;
    let client = helpers::client(&base).await;
    client.sign_in("ann@corp.com", "secret").await.expect("sign in");

    client
        .put_presigned(
            &format!("{base}//icons//a.png?sig=1"),
            bytes::Bytes::from_static(b"png-bytes"),
            "image/png",
        )
        .await
        .expect("put");

    assert_eq!(*seen.lock().expect("lock"), vec!["<none>", "png-bytes"]);
}
