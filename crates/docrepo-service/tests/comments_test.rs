//! Integration tests for the comment feed.

mod helpers;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde_json::{Value, json};

use docrepo_core::error::ErrorKind;
use docrepo_service::CommentFeed;

fn comment(id: &str, document: &str, content: &str, created: &str) -> Value {
    json!({
        "_id": id,
        "content": content,
        "userId": "u1",
        "documentId": document,
        "createdAt": created,
        "updatedAt": created,
        "user": { "email": "ann@corp.com", "fullname": "Ann Lee" },
    })
}

fn router() -> Router {
    Router::new()
        .route(
            "/user/comments/all",
            get(|| async {
                Json(json!({
                    "commentsByDocument": {
                        "hr/policy.pdf": [
                            comment("c1", "hr/policy.pdf", "Outdated section 3", "2024-03-01T09:00:00Z"),
                            comment("c3", "hr/policy.pdf", "Fixed now", "2024-03-03T09:00:00Z"),
                        ],
                        "finance/budget.xlsx": [
                            comment("c2", "finance/budget.xlsx", "Numbers look off", "2024-03-02T09:00:00Z"),
                        ],
                    }
                }))
            }),
        )
        .route(
            "/user/comment",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "message": "Added",
                    "comment": comment(
                        "c9",
                        body["documentId"].as_str().unwrap_or_default(),
                        body["comment"].as_str().unwrap_or_default(),
                        "2024-03-04T09:00:00Z",
                    ),
                }))
            })
            .put(|Json(body): Json<Value>| async move {
                let mut edited = comment(
                    "c2",
                    body["documentId"].as_str().unwrap_or_default(),
                    body["comment"].as_str().unwrap_or_default(),
                    "2024-03-02T09:00:00Z",
                );
                edited["updatedAt"] = json!("2024-03-05T09:00:00Z");
                Json(json!({ "message": "Updated", "comment": edited }))
            })
            .delete(|| async { Json(json!({ "message": "Deleted" })) }),
        )
}

async fn loaded_feed(recorder: &helpers::Recorder) -> CommentFeed {
    let base = helpers::spawn_recorded(router(), recorder).await;
    let mut feed = CommentFeed::new(helpers::client(&base).await);
    feed.load().await.expect("load");
    feed
}

#[tokio::test]
async fn test_load_flattens_newest_first() {
    let recorder = helpers::Recorder::default();
    let feed = loaded_feed(&recorder).await;

    let ids: Vec<_> = feed.comments().iter().map(|c| c.comment.id.as_str()).collect();
    assert_eq!(ids, vec!["c3", "c2", "c1"]);
    assert_eq!(feed.comments()[1].document_name, "budget.xlsx");
    assert_eq!(feed.for_document("hr/policy.pdf").len(), 2);
    assert_eq!(feed.search("BUDGET").len(), 1);
    assert_eq!(feed.search("ann lee").len(), 3);
}

#[tokio::test]
async fn test_reply_edit_delete() {
    let recorder = helpers::Recorder::default();
    let mut feed = loaded_feed(&recorder).await;

    let reply = feed
        .reply("ann@corp.com", "hr/policy.pdf", "  Thanks  ")
        .await
        .expect("reply");
    assert_eq!(reply.comment.content, "Thanks");
    assert_eq!(feed.comments()[0].comment.id, "c9");

    let edited = feed.edit("c2", "Numbers fixed").await.expect("edit");
    assert!(edited.comment.is_edited());
    assert_eq!(edited.document_name, "budget.xlsx");

    feed.delete("c1").await.expect("delete");
    assert!(feed.comments().iter().all(|c| c.comment.id != "c1"));
    assert_eq!(feed.comments().len(), 3);

    let err = feed.delete("nope").await.expect_err("unknown");
    assert_eq!(err.kind, ErrorKind::NotFound);
    let err = feed.reply("ann@corp.com", "x", " ").await.expect_err("blank");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(recorder.count("DELETE /user/comment"), 1);
}
