use scribe_common::{Comment, LikeState, Page, constants::endpoints};

use super::form::{FormPayload, Upload};
use super::query::CommentQuery;
use super::resource_path;
use crate::client::ApiRequest;
use crate::{Result, ScribeHttpClient};

/// Payload for `POST /comments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    #[allow(missing_docs)]
    pub content: String,
    #[allow(missing_docs)]
    pub post_id: String,
    /// Set when replying to another comment.
    pub parent_id: Option<String>,
    /// Sent as repeated `images` parts.
    pub images: Vec<Upload>,
}

impl NewComment {
    pub(crate) fn to_form(&self) -> FormPayload {
        let form = FormPayload::new()
            .text("content", self.content.as_str())
            .text("postId", self.post_id.as_str())
            .text_opt("parentId", self.parent_id.as_deref());
        self.images
            .iter()
            .cloned()
            .fold(form, |form, image| form.file("images", image))
    }
}

/// Payload for `PUT /comments/:id`. `content` is always sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentUpdate {
    #[allow(missing_docs)]
    pub content: String,
    #[allow(missing_docs)]
    pub images: Vec<Upload>,
}

impl CommentUpdate {
    pub(crate) fn to_form(&self) -> FormPayload {
        let form = FormPayload::new().text("content", self.content.as_str());
        self.images
            .iter()
            .cloned()
            .fold(form, |form, image| form.file("images", image))
    }
}

/// Comments and replies.
///
/// Returned by [`ScribeHttpClient::comments()`].
#[derive(Debug, Clone)]
pub struct CommentsApi {
    client: ScribeHttpClient,
}

impl ScribeHttpClient {
    /// Comment endpoints.
    pub fn comments(&self) -> CommentsApi {
        CommentsApi {
            client: self.clone(),
        }
    }
}

impl CommentsApi {
    /// `GET /comments?postId&parentId&page&limit`.
    pub async fn list(&self, query: &CommentQuery) -> Result<Page<Comment>> {
        let request = ApiRequest::get(endpoints::COMMENTS).query_pairs(query.to_query());
        self.client.fetch_page(&request).await
    }

    /// `GET /comments/:id`.
    pub async fn get(&self, id: &str) -> Result<Comment> {
        let request = ApiRequest::get(resource_path(endpoints::COMMENTS, id)?);
        self.client.fetch_data(&request).await
    }

    /// `POST /comments` as multipart.
    pub async fn create(&self, comment: &NewComment) -> Result<Comment> {
        let request = ApiRequest::post(endpoints::COMMENTS).form(comment.to_form());
        let created: Comment = self.client.fetch_data(&request).await?;
        tracing::debug!(id = %created.id, post = %created.post, "Created comment");
        Ok(created)
    }

    /// `PUT /comments/:id` as multipart.
    pub async fn update(&self, id: &str, update: &CommentUpdate) -> Result<Comment> {
        let request =
            ApiRequest::put(resource_path(endpoints::COMMENTS, id)?).form(update.to_form());
        self.client.fetch_data(&request).await
    }

    /// `DELETE /comments/:id`. Returns the server's message, if any.
    pub async fn delete(&self, id: &str) -> Result<Option<String>> {
        let request = ApiRequest::delete(resource_path(endpoints::COMMENTS, id)?);
        self.client.fetch_ack(&request).await
    }

    /// `PUT /comments/:id/like`.
    pub async fn toggle_like(&self, id: &str) -> Result<LikeState> {
        let path = format!("{}/like", resource_path(endpoints::COMMENTS, id)?);
        self.client.fetch_data(&ApiRequest::put(path)).await
    }
}
