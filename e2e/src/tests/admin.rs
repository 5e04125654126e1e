use httpmock::prelude::*;
use scribe::api::PageQuery;
use scribe::guards::{Guard, GuardOutcome, Route};
use scribe::{AuthStore, Role};
use serde_json::json;

use super::utils::{post_json, signed_in_client, user_json};

#[tokio::test]
async fn dashboard_totals() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::Admin, "t1", Some("r1")).await;

    let dashboard = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/admin/dashboard")
                .header("Authorization", "Bearer t1");
            let mut popular = post_json("p1", "Popular");
            popular["viewCount"] = json!(40);
            popular["likeCount"] = json!(3);
            let mut other = post_json("p2", "Other");
            other["viewCount"] = json!(2);
            then.status(200).json_body(json!({
                "success": true,
                "data": {
                    "stats": {
                        "totalUsers": 5,
                        "totalPosts": 7,
                        "publishedPosts": 4,
                        "draftPosts": 3,
                        "totalComments": 11,
                    },
                    "recentUsers": [user_json("u2", "user")],
                    "recentPosts": [],
                    "popularPosts": [popular, other],
                },
            }));
        })
        .await;

    let data = client.admin().dashboard().await.unwrap();
    dashboard.assert_async().await;

    assert_eq!(data.stats.total_users, 5);
    assert_eq!(data.stats.draft_posts, 3);
    assert_eq!(data.total_views(), 42);
    assert_eq!(data.total_likes(), 3);
    assert_eq!(data.recent_users[0].role, Role::User);
}

#[tokio::test]
async fn manage_users() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::Admin, "t1", Some("r1")).await;

    let users = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/admin/users")
                .query_param("page", "3")
                .query_param("limit", "20");
            then.status(200).json_body(json!({
                "success": true,
                "count": 1,
                "pagination": { "page": 3, "limit": 20, "totalPages": 3, "totalResults": 41 },
                "data": [user_json("u2", "user")],
            }));
        })
        .await;
    let role = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/users/u2/role")
                .json_body(json!({ "role": "admin" }));
            then.status(200)
                .json_body(json!({ "success": true, "data": user_json("u2", "admin") }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/admin/users/u2");
            then.status(200)
                .json_body(json!({ "success": true, "message": "User deleted" }));
        })
        .await;

    let page = client.admin().users(PageQuery::new(3, 20)).await.unwrap();
    assert_eq!(page.items[0].id, "u2");
    assert!(!page.has_next());

    let promoted = client
        .admin()
        .update_user_role("u2", Role::Admin)
        .await
        .unwrap();
    assert!(promoted.is_admin());

    let message = client.admin().delete_user("u2").await.unwrap();
    assert_eq!(message.as_deref(), Some("User deleted"));
    // Dot segments would collapse onto a different endpoint.
    assert!(client.admin().delete_user("..").await.is_err());
    assert!(client.admin().delete_user(".").await.is_err());

    users.assert_async().await;
    role.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn moderation_listings() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::Admin, "t1", Some("r1")).await;

    let posts = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/admin/posts");
            then.status(200)
                .json_body(json!({ "success": true, "data": [post_json("p1", "Any")] }));
        })
        .await;
    let comments = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/admin/comments");
            then.status(200)
                .json_body(json!({ "success": true, "data": [] }));
        })
        .await;

    let page = client.admin().posts(PageQuery::default()).await.unwrap();
    assert_eq!(page.count, 1);
    let page = client.admin().comments(PageQuery::default()).await.unwrap();
    assert!(page.items.is_empty());

    posts.assert_async().await;
    comments.assert_async().await;
}

#[tokio::test]
async fn guards_follow_the_session() {
    let server = MockServer::start_async().await;

    let admin = signed_in_client(&server, Role::Admin, "t1", None).await;
    let state = admin.store().state().await;
    assert_eq!(Guard::Admin.check(&state), GuardOutcome::Allow);

    let user = signed_in_client(&server, Role::User, "t2", None).await;
    let state = user.store().state().await;
    assert_eq!(Guard::Authenticated.check(&state), GuardOutcome::Allow);
    assert_eq!(
        Guard::Admin.check(&state),
        GuardOutcome::Redirect(Route::Home)
    );

    // Signing out flips the guard.
    user.auth().logout().await.unwrap();
    let state = user.store().state().await;
    assert_eq!(
        Guard::Authenticated.check(&state),
        GuardOutcome::Redirect(Route::Login)
    );

    let fresh = AuthStore::new(scribe::MemoryStorage::default());
    assert_eq!(
        Guard::Authenticated.check(&fresh.state().await),
        GuardOutcome::Pending
    );
}
