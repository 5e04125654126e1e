//! Aggregate statistics shown on the admin dashboard. Computed server-side.

use serde::{Deserialize, Serialize};

use crate::{post::Post, user::User};

/// Site-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_posts: u64,
    pub published_posts: u64,
    pub draft_posts: u64,
    pub total_comments: u64,
}

/// Payload of `GET /admin/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dashboard {
    #[allow(missing_docs)]
    pub stats: DashboardStats,
    /// Newest sign-ups.
    pub recent_users: Vec<User>,
    /// Newest posts.
    pub recent_posts: Vec<Post>,
    /// Most viewed posts.
    pub popular_posts: Vec<Post>,
}

impl Dashboard {
    /// Sum of the popular posts' view counters.
    pub fn total_views(&self) -> u64 {
        self.popular_posts.iter().map(|p| p.view_count).sum()
    }

    /// Sum of the popular posts' like counters.
    pub fn total_likes(&self) -> u64 {
        self.popular_posts.iter().map(|p| p.like_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_sums_popular_posts() {
        let dash: Dashboard = serde_json::from_str(
            r#"{
                "stats": {"totalUsers": 3, "totalPosts": 5, "publishedPosts": 4, "draftPosts": 1, "totalComments": 9},
                "popularPosts": [
                    {"_id": "a", "title": "A", "author": "u1", "viewCount": 10, "likeCount": 2},
                    {"_id": "b", "title": "B", "author": "u1", "viewCount": 5, "likeCount": 1}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(dash.stats.total_users, 3);
        assert_eq!(dash.stats.draft_posts, 1);
        assert!(dash.recent_users.is_empty());
        assert_eq!(dash.total_views(), 15);
        assert_eq!(dash.total_likes(), 3);
    }
}
