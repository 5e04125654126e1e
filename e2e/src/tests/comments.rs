use httpmock::prelude::*;
use scribe::Role;
use scribe::api::{CommentQuery, Upload};
use scribe::forms::CommentForm;
use serde_json::json;

use super::utils::{anonymous_client, comment_json, signed_in_client};

#[tokio::test]
async fn list_threads_for_a_post() {
    let server = MockServer::start_async().await;
    let client = anonymous_client(&server);

    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/comments")
                .query_param("postId", "p1")
                .query_param("page", "1")
                .query_param("limit", "10");
            let mut root = comment_json("c1", "p1", "First");
            root["replies"] = json!([{
                "_id": "c2",
                "content": "Reply",
                "post": "p1",
                "author": "u2",
                "parent": "c1",
            }]);
            then.status(200)
                .json_body(json!({ "success": true, "count": 1, "data": [root] }));
        })
        .await;

    let page = client
        .comments()
        .list(&CommentQuery::for_post("p1"))
        .await
        .unwrap();
    list.assert_async().await;

    let root = &page.items[0];
    assert!(root.is_root());
    assert_eq!(root.replies.len(), 1);
    assert_eq!(root.replies[0].parent.as_deref(), Some("c1"));
    assert_eq!(root.replies[0].author.id(), "u2");
}

#[tokio::test]
async fn replies_filter_by_parent() {
    let server = MockServer::start_async().await;
    let client = anonymous_client(&server);

    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/comments")
                .query_param("postId", "p1")
                .query_param("parentId", "c1")
                .query_param("page", "2")
                .query_param("limit", "5");
            then.status(200)
                .json_body(json!({ "success": true, "data": [] }));
        })
        .await;

    let query = CommentQuery::for_post("p1").replies_to("c1").page(2, 5);
    let page = client.comments().list(&query).await.unwrap();
    assert!(page.items.is_empty());
    list.assert_async().await;
}

#[tokio::test]
async fn reply_with_images() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::User, "t1", Some("r1")).await;

    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/comments")
                .header("Authorization", "Bearer t1")
                .body_contains("name=\"postId\"")
                .body_contains("name=\"parentId\"")
                .body_contains("filename=\"a.png\"")
                .body_contains("filename=\"b.png\"");
            let mut reply = comment_json("c3", "p1", "Nice");
            reply["parent"] = json!("c1");
            reply["images"] = json!(["/uploads/a.png", "/uploads/b.png"]);
            then.status(201)
                .json_body(json!({ "success": true, "data": reply }));
        })
        .await;

    let form = CommentForm {
        content: "Nice".into(),
        images: vec![
            Upload::from_bytes("a.png", vec![1, 2, 3]),
            Upload::from_bytes("b.png", vec![4, 5, 6]),
        ],
    };
    let comment = client
        .comments()
        .create(&form.into_new_comment("p1", Some("c1".into())).unwrap())
        .await
        .unwrap();
    create.assert_async().await;

    assert!(!comment.is_root());
    assert_eq!(comment.images.len(), 2);
}

#[tokio::test]
async fn edit_like_and_delete() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::User, "t1", Some("r1")).await;

    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/comments/c1")
                .body_contains("Edited text");
            let mut edited = comment_json("c1", "p1", "Edited text");
            edited["isEdited"] = json!(true);
            then.status(200)
                .json_body(json!({ "success": true, "data": edited }));
        })
        .await;
    let like = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/comments/c1/like");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "likeCount": 0, "likedBy": [] },
            }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/comments/c1");
            then.status(204);
        })
        .await;

    let form = CommentForm {
        content: "Edited text".into(),
        images: Vec::new(),
    };
    let comment = client
        .comments()
        .update("c1", &form.into_update().unwrap())
        .await
        .unwrap();
    assert!(comment.is_edited);

    let likes = client.comments().toggle_like("c1").await.unwrap();
    assert!(!likes.is_liked_by("u1"));

    // An empty body still counts as success.
    assert_eq!(client.comments().delete("c1").await.unwrap(), None);

    update.assert_async().await;
    like.assert_async().await;
    delete.assert_async().await;
}
