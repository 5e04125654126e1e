#![doc = include_str!("../README.md")]
//!

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(any(), deny(clippy::unwrap_used))]

pub mod admin;
pub mod auth;
pub mod comment;
pub mod constants;
pub mod envelope;
pub mod post;
pub mod user;

pub use admin::{Dashboard, DashboardStats};
pub use auth::{AuthResponse, AuthSnapshot};
pub use comment::Comment;
pub use envelope::{Envelope, EnvelopeError, Page, Pagination};
pub use post::{AuthorRef, AuthorSummary, LikeState, Post, PostStatus};
pub use user::{Role, User};
