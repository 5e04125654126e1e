//! Subcommand implementations.
//!
//! Each command reports its outcome through [`crate::notify`] and prints
//! payloads on stdout.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use scribe::api::Upload;
use scribe::editor::ToolbarAction;
use scribe::{PostStatus, Role};

pub mod admin;
pub mod auth;
pub mod comments;
pub mod editor;
pub mod posts;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name.
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// Avatar image to upload.
    #[arg(long, value_name = "FILE")]
    pub avatar: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long, value_name = "FILE")]
    pub avatar: Option<PathBuf>,
}

/// Post visibility as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Draft,
    Published,
}

impl From<StatusArg> for PostStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Draft => PostStatus::Draft,
            StatusArg::Published => PostStatus::Published,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = scribe::constants::DEFAULT_PAGE_LIMIT)]
    pub limit: u32,
}

impl ListArgs {
    pub fn query(&self) -> scribe::api::PageQuery {
        scribe::api::PageQuery::new(self.page, self.limit)
    }
}

#[derive(Args, Debug)]
pub struct PostListArgs {
    /// Full text search.
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    /// Author id.
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Sort key understood by the server, e.g. `-createdAt`.
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Fields of a post. On `edit`, absent fields are left unchanged.
#[derive(Args, Debug)]
pub struct PostFields {
    #[arg(long)]
    pub title: Option<String>,
    /// Markdown file holding the body.
    #[arg(long, value_name = "FILE")]
    pub content: Option<PathBuf>,
    #[arg(long)]
    pub excerpt: Option<String>,
    /// Comma separated, e.g. `rust,web`.
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    #[arg(long, value_name = "FILE")]
    pub cover_image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum PostsCommand {
    /// List posts matching the filters.
    List(PostListArgs),
    /// Show one post.
    Show { id: String },
    /// Publish a new post, or save it as a draft.
    Create(PostFields),
    /// Change an existing post.
    Edit {
        id: String,
        #[command(flatten)]
        fields: PostFields,
    },
    /// Delete a post.
    Delete { id: String },
    /// Like or unlike a post.
    Like { id: String },
    /// Your unpublished drafts.
    Drafts(ListArgs),
}

#[derive(Subcommand, Debug)]
pub enum CommentsCommand {
    /// Comments on a post, with their replies.
    List {
        post_id: String,
        /// Only replies to this comment.
        #[arg(long)]
        parent: Option<String>,
        #[command(flatten)]
        page: ListArgs,
    },
    /// Comment on a post.
    Add {
        post_id: String,
        content: String,
        /// Reply to this comment.
        #[arg(long)]
        reply_to: Option<String>,
        /// Attach an image. Repeatable.
        #[arg(long = "image", value_name = "FILE")]
        images: Vec<PathBuf>,
    },
    /// Change a comment.
    Edit {
        id: String,
        content: String,
        #[arg(long = "image", value_name = "FILE")]
        images: Vec<PathBuf>,
    },
    /// Delete a comment.
    Delete { id: String },
    /// Like or unlike a comment.
    Like { id: String },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Site statistics and recent activity.
    Dashboard,
    /// All users.
    Users(ListArgs),
    /// Change a user's role.
    SetRole {
        user_id: String,
        #[arg(value_enum)]
        role: RoleArg,
    },
    /// Delete a user.
    DeleteUser { user_id: String },
    /// All posts, drafts included.
    Posts(ListArgs),
    /// All comments.
    Comments(ListArgs),
}

/// Toolbar actions as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionArg {
    Bold,
    Italic,
    List,
    NumberedList,
    Quote,
    Code,
    Link,
    Image,
}

impl From<ActionArg> for ToolbarAction {
    fn from(action: ActionArg) -> Self {
        match action {
            ActionArg::Bold => ToolbarAction::Bold,
            ActionArg::Italic => ToolbarAction::Italic,
            ActionArg::List => ToolbarAction::UnorderedList,
            ActionArg::NumberedList => ToolbarAction::OrderedList,
            ActionArg::Quote => ToolbarAction::Quote,
            ActionArg::Code => ToolbarAction::Code,
            ActionArg::Link => ToolbarAction::Link,
            ActionArg::Image => ToolbarAction::Image,
        }
    }
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    pub file: PathBuf,
    #[arg(value_enum)]
    pub action: ActionArg,
    /// First character of the selection.
    #[arg(long, default_value_t = 0)]
    pub from: usize,
    /// One past the last character of the selection. Defaults to `--from`.
    #[arg(long)]
    pub to: Option<usize>,
}

/// Read every path as an upload.
pub async fn uploads(paths: &[PathBuf]) -> scribe::Result<Vec<Upload>> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        uploads.push(Upload::from_path(path).await?);
    }
    Ok(uploads)
}

/// Read `path` as an upload if given.
pub async fn upload_opt(path: Option<&PathBuf>) -> scribe::Result<Option<Upload>> {
    match path {
        Some(path) => Upload::from_path(path).await.map(Some),
        None => Ok(None),
    }
}
