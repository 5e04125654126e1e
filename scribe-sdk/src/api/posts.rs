use scribe_common::{LikeState, Page, Post, PostStatus, constants::endpoints};

use super::form::{FormPayload, Upload, encode_tags};
use super::query::{PageQuery, PostFilters};
use super::resource_path;
use crate::client::ApiRequest;
use crate::{Result, ScribeHttpClient};

/// Payload for `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    #[allow(missing_docs)]
    pub title: String,
    /// Markdown body.
    pub content: String,
    #[allow(missing_docs)]
    pub excerpt: Option<String>,
    #[allow(missing_docs)]
    pub cover_image: Option<Upload>,
    /// Sent as a JSON array string, even when empty.
    pub tags: Vec<String>,
    #[allow(missing_docs)]
    pub status: PostStatus,
}

impl NewPost {
    #[allow(missing_docs)]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            excerpt: None,
            cover_image: None,
            tags: Vec::new(),
            status: PostStatus::Draft,
        }
    }

    pub(crate) fn to_form(&self) -> FormPayload {
        FormPayload::new()
            .text("title", self.title.as_str())
            .text("content", self.content.as_str())
            .text_opt("excerpt", self.excerpt.as_deref())
            .file_opt("coverImage", self.cover_image.clone())
            .text("tags", encode_tags(&self.tags))
            .text("status", self.status.as_str())
    }
}

/// Partial update for `PUT /posts/:id`. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    #[allow(missing_docs)]
    pub title: Option<String>,
    #[allow(missing_docs)]
    pub content: Option<String>,
    #[allow(missing_docs)]
    pub excerpt: Option<String>,
    #[allow(missing_docs)]
    pub cover_image: Option<Upload>,
    #[allow(missing_docs)]
    pub tags: Option<Vec<String>>,
    #[allow(missing_docs)]
    pub status: Option<PostStatus>,
}

impl PostUpdate {
    pub(crate) fn to_form(&self) -> FormPayload {
        let form = FormPayload::new()
            .text_opt("title", self.title.as_deref())
            .text_opt("content", self.content.as_deref())
            .text_opt("excerpt", self.excerpt.as_deref())
            .file_opt("coverImage", self.cover_image.clone());
        let form = match &self.tags {
            Some(tags) => form.text("tags", encode_tags(tags)),
            None => form,
        };
        form.text_opt("status", self.status.map(|s| s.as_str()))
    }
}

/// Blog posts.
///
/// Returned by [`ScribeHttpClient::posts()`]. Reads work anonymously; writes
/// need a signed-in store.
///
/// ```no_run
/// # async fn run(client: scribe::ScribeHttpClient) -> scribe::Result<()> {
/// use scribe::api::PostFilters;
///
/// let page = client.posts().list(&PostFilters::default().tag("rust").page(2)).await?;
/// for post in &page.items {
///     println!("{} ({} likes)", post.title, post.like_count);
/// }
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct PostsApi {
    client: ScribeHttpClient,
}

impl ScribeHttpClient {
    /// Post endpoints.
    pub fn posts(&self) -> PostsApi {
        PostsApi {
            client: self.clone(),
        }
    }
}

impl PostsApi {
    /// `GET /posts` with `filters`.
    pub async fn list(&self, filters: &PostFilters) -> Result<Page<Post>> {
        let request = ApiRequest::get(endpoints::POSTS).query_pairs(filters.to_query());
        self.client.fetch_page(&request).await
    }

    /// `GET /posts/:id`.
    pub async fn get(&self, id: &str) -> Result<Post> {
        let request = ApiRequest::get(resource_path(endpoints::POSTS, id)?);
        self.client.fetch_data(&request).await
    }

    /// `POST /posts` as multipart.
    pub async fn create(&self, post: &NewPost) -> Result<Post> {
        let request = ApiRequest::post(endpoints::POSTS).form(post.to_form());
        let created: Post = self.client.fetch_data(&request).await?;
        tracing::info!(id = %created.id, status = %created.status, "Created post");
        Ok(created)
    }

    /// `PUT /posts/:id` as multipart.
    pub async fn update(&self, id: &str, update: &PostUpdate) -> Result<Post> {
        let request = ApiRequest::put(resource_path(endpoints::POSTS, id)?).form(update.to_form());
        self.client.fetch_data(&request).await
    }

    /// `DELETE /posts/:id`. Returns the server's message, if any.
    pub async fn delete(&self, id: &str) -> Result<Option<String>> {
        let request = ApiRequest::delete(resource_path(endpoints::POSTS, id)?);
        let message = self.client.fetch_ack(&request).await?;
        tracing::info!(%id, "Deleted post");
        Ok(message)
    }

    /// `PUT /posts/:id/like`: like if not yet liked, unlike otherwise.
    pub async fn toggle_like(&self, id: &str) -> Result<LikeState> {
        let path = format!("{}/like", resource_path(endpoints::POSTS, id)?);
        self.client.fetch_data(&ApiRequest::put(path)).await
    }

    /// `GET /posts/user/drafts`: the signed-in user's drafts.
    pub async fn drafts(&self, page: PageQuery) -> Result<Page<Post>> {
        let request = ApiRequest::get(endpoints::POST_DRAFTS).query_pairs(page.to_query());
        self.client.fetch_page(&request).await
    }
}
