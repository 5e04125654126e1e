use std::sync::Once;

use httpmock::MockServer;
use scribe::{AuthSnapshot, AuthStore, MemoryStorage, Role, ScribeHttpClient, User};
use serde_json::{Value, json};

static TRACING_INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(std::env::var("TRACING").unwrap_or_else(|_| "info".to_string()))
            // Use with_test_writer to ensure logs are captured correctly by the test runner.
            .with_test_writer()
            .init();
    });
}

/// `<mock>/api`, the base URL every client in these tests talks to.
pub fn api_base(server: &MockServer) -> String {
    server.url("/api")
}

pub fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: format!("User {id}"),
        email: format!("{id}@example.com"),
        role,
        avatar: None,
        bio: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("User {id}"),
        "email": format!("{id}@example.com"),
        "role": role,
    })
}

pub fn post_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "slug": title.to_lowercase().replace(' ', "-"),
        "content": "Body",
        "author": { "_id": "u1", "name": "User u1" },
        "tags": ["rust"],
        "status": "published",
        "likeCount": 0,
        "likedBy": [],
    })
}

pub fn comment_json(id: &str, post: &str, content: &str) -> Value {
    json!({
        "_id": id,
        "content": content,
        "post": post,
        "author": { "_id": "u1", "name": "User u1" },
    })
}

/// A client whose store already holds a session, as if rehydrated from disk.
pub async fn signed_in_client(
    server: &MockServer,
    role: Role,
    token: &str,
    refresh_token: Option<&str>,
) -> ScribeHttpClient {
    init_tracing();
    let store = AuthStore::new(MemoryStorage::with_snapshot(AuthSnapshot {
        user: Some(user("u1", role)),
        token: Some(token.to_string()),
        refresh_token: refresh_token.map(str::to_string),
        is_authenticated: true,
    }));
    store.rehydrate().await;
    ScribeHttpClient::builder()
        .base_url(api_base(server))
        .store(store)
        .build()
        .unwrap()
}

/// A client with an empty, initialized store.
pub fn anonymous_client(server: &MockServer) -> ScribeHttpClient {
    init_tracing();
    ScribeHttpClient::new(&api_base(server)).unwrap()
}
