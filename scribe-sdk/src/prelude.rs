//! Common imports for quick starts.

// Common
pub use crate::{BuildError, Error, Result};

// Transport
pub use crate::{ScribeHttpClient, ScribeHttpClientBuilder};

// Session
pub use crate::{AuthState, AuthStore, FileStorage};

// Resource payloads and queries
pub use crate::api::{
    CommentQuery, CommentUpdate, NewComment, NewPost, PageQuery, PostFilters, PostUpdate,
    ProfileUpdate, Upload,
};

// Views
pub use crate::editor::{Editor, ToolbarAction};
pub use crate::forms::FieldErrors;
pub use crate::guards::{Guard, GuardOutcome, Route};

// Model
pub use crate::{Comment, Page, Post, PostStatus, Role, User};
