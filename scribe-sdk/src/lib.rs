#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(any(), deny(clippy::unwrap_used))]

pub mod api;
pub mod client;
pub mod editor;
pub mod errors;
pub mod forms;
pub mod guards;
mod store;
mod util;

pub mod prelude;

// --- PUBLIC API EXPORTS ---
// Transport
pub use client::{ScribeHttpClient, ScribeHttpClientBuilder};
// Session state
pub use store::core::{AuthState, AuthStore};
pub use store::persist::{FileStorage, MemoryStorage, SnapshotStorage};

// Errors
pub use errors::{BuildError, Error, Result};

// Re-exports
pub use reqwest::{Method, StatusCode};
pub use scribe_common::{
    AuthSnapshot, AuthorRef, AuthorSummary, Comment, Dashboard, DashboardStats, LikeState, Page,
    Pagination, Post, PostStatus, Role, User, constants,
};
