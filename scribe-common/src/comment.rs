//! Comments with single-level reply threading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::post::AuthorRef;

/// A comment on a post, or a reply to another comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", alias = "id")]
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub content: String,
    /// Id of the post this comment belongs to.
    pub post: String,
    #[allow(missing_docs)]
    pub author: AuthorRef,
    /// Id of the comment this one replies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Uploaded image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub like_count: u64,
    #[serde(default)]
    #[allow(missing_docs)]
    pub liked_by: Vec<String>,
    /// Set by the server once the content was changed after creation.
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Replies, when the server embeds them. Never nested further.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// True for a top-level comment.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True if `user_id` is in the like set.
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_thread() {
        let comment: Comment = serde_json::from_str(
            r#"{
                "_id": "c1",
                "content": "first",
                "post": "p1",
                "author": {"_id": "u1", "name": "Ann"},
                "likeCount": 1,
                "likedBy": ["u2"],
                "isEdited": false,
                "replies": [
                    {"_id": "c2", "content": "reply", "post": "p1", "author": "u2", "parent": "c1", "isEdited": true}
                ]
            }"#,
        )
        .unwrap();

        assert!(comment.is_root());
        assert!(comment.is_liked_by("u2"));
        assert_eq!(comment.replies.len(), 1);
        let reply = &comment.replies[0];
        assert_eq!(reply.parent.as_deref(), Some("c1"));
        assert!(reply.is_edited);
        assert!(reply.replies.is_empty());
    }
}
