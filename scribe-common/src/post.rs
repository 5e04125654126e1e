//! Blog posts and author references.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a [`Post`], chosen at save time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Only visible to its author.
    #[default]
    Draft,
    /// Visible in public listings.
    Published,
}

impl PostStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown post status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post status `{0}`, expected `draft` or `published`")]
pub struct UnknownStatus(pub String);

impl FromStr for PostStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Minimal author data embedded by the server when it populates a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    #[serde(rename = "_id", alias = "id")]
    #[allow(missing_docs)]
    pub id: String,
    #[serde(default)]
    #[allow(missing_docs)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub avatar: Option<String>,
}

/// Opaque foreign key to a user, optionally populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    /// Bare identifier.
    Id(String),
    /// Populated summary.
    Summary(AuthorSummary),
}

impl AuthorRef {
    /// Identifier regardless of population.
    pub fn id(&self) -> &str {
        match self {
            AuthorRef::Id(id) => id,
            AuthorRef::Summary(summary) => &summary.id,
        }
    }

    /// Display name if the server populated it.
    pub fn name(&self) -> Option<&str> {
        match self {
            AuthorRef::Id(_) => None,
            AuthorRef::Summary(summary) => Some(&summary.name),
        }
    }
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", alias = "id")]
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub title: String,
    /// URL slug, assigned by the server.
    #[serde(default)]
    pub slug: String,
    /// Markdown source.
    #[serde(default)]
    pub content: String,
    /// Server-rendered HTML of `content`, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub excerpt: Option<String>,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[allow(missing_docs)]
    pub author: AuthorRef,
    /// Tags in the order the author entered them.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub status: PostStatus,
    #[serde(default)]
    #[allow(missing_docs)]
    pub view_count: u64,
    #[serde(default)]
    #[allow(missing_docs)]
    pub like_count: u64,
    /// Ids of users who liked the post.
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// True if `user_id` is in the like set.
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }

    /// True for posts visible in public listings.
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// True if `user_id` wrote this post.
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author.id() == user_id
    }
}

/// Like counter after a toggle on a post or comment.
///
/// The server may answer with the whole updated resource; only the like
/// fields are read from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    #[serde(default)]
    #[allow(missing_docs)]
    pub like_count: u64,
    #[serde(default)]
    #[allow(missing_docs)]
    pub liked_by: Vec<String>,
}

impl LikeState {
    /// True if `user_id` is in the like set.
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }
}
