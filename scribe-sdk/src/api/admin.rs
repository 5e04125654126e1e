use serde::Serialize;

use scribe_common::{Comment, Dashboard, Page, Post, Role, User, constants::endpoints};

use super::query::PageQuery;
use super::resource_path;
use crate::client::ApiRequest;
use crate::{Result, ScribeHttpClient};

#[derive(Serialize)]
struct RoleBody {
    role: Role,
}

/// Moderation and statistics. The server rejects non-admins with `403`.
///
/// Returned by [`ScribeHttpClient::admin()`].
#[derive(Debug, Clone)]
pub struct AdminApi {
    client: ScribeHttpClient,
}

impl ScribeHttpClient {
    /// Admin endpoints.
    pub fn admin(&self) -> AdminApi {
        AdminApi {
            client: self.clone(),
        }
    }
}

impl AdminApi {
    /// `GET /admin/dashboard`.
    pub async fn dashboard(&self) -> Result<Dashboard> {
        self.client
            .fetch_data(&ApiRequest::get(endpoints::ADMIN_DASHBOARD))
            .await
    }

    /// `GET /admin/users?page&limit`.
    pub async fn users(&self, page: PageQuery) -> Result<Page<User>> {
        let request = ApiRequest::get(endpoints::ADMIN_USERS).query_pairs(page.to_query());
        self.client.fetch_page(&request).await
    }

    /// `PUT /admin/users/:id/role`.
    pub async fn update_user_role(&self, user_id: &str, role: Role) -> Result<User> {
        let path = format!("{}/role", resource_path(endpoints::ADMIN_USERS, user_id)?);
        let request = ApiRequest::put(path).json(&RoleBody { role })?;
        let user: User = self.client.fetch_data(&request).await?;
        tracing::info!(user = %user_id, %role, "Changed user role");
        Ok(user)
    }

    /// `DELETE /admin/users/:id`.
    pub async fn delete_user(&self, user_id: &str) -> Result<Option<String>> {
        let request = ApiRequest::delete(resource_path(endpoints::ADMIN_USERS, user_id)?);
        let message = self.client.fetch_ack(&request).await?;
        tracing::info!(user = %user_id, "Deleted user");
        Ok(message)
    }

    /// `GET /admin/posts?page&limit`, drafts included.
    pub async fn posts(&self, page: PageQuery) -> Result<Page<Post>> {
        let request = ApiRequest::get(endpoints::ADMIN_POSTS).query_pairs(page.to_query());
        self.client.fetch_page(&request).await
    }

    /// `GET /admin/comments?page&limit`.
    pub async fn comments(&self, page: PageQuery) -> Result<Page<Comment>> {
        let request = ApiRequest::get(endpoints::ADMIN_COMMENTS).query_pairs(page.to_query());
        self.client.fetch_page(&request).await
    }
}
