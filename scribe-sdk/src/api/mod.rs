//! Typed resource endpoints.
//!
//! Each handle is obtained from a [`crate::ScribeHttpClient`] (`client.posts()`,
//! `client.comments()`, ...), performs one HTTP call per method and returns the
//! envelope's payload.

mod admin;
mod auth;
mod comments;
pub mod form;
mod posts;
mod query;
mod users;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use comments::{CommentUpdate, CommentsApi, NewComment};
pub use form::{FormPayload, FormValue, Upload, decode_tags, encode_tags};
pub use posts::{NewPost, PostUpdate, PostsApi};
pub use query::{CommentQuery, PageQuery, PostFilters};
pub use users::{ProfileUpdate, UsersApi};

use crate::errors::{RequestError, Result};

/// `{collection}/{id}`, rejecting ids that would escape the path segment.
pub(crate) fn resource_path(collection: &str, id: &str) -> Result<String> {
    if id.trim().is_empty() || matches!(id, "." | "..") || id.contains(['/', '\\', '?', '#']) {
        return Err(RequestError::Validation {
            message: format!("invalid resource id {id:?}"),
        }
        .into());
    }
    Ok(format!("{collection}/{id}"))
}
