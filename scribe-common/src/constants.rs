//! Constants used across Scribe.

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Fixed key under which the auth snapshot is persisted.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Default page size for paginated listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Minimum password length accepted by the forms.
pub const MIN_PASSWORD_LEN: usize = 6;

/// REST endpoint paths, relative to the API base URL.
pub mod endpoints {
    /// `POST` credentials, returns tokens and the user.
    pub const LOGIN: &str = "/auth/login";
    /// `POST` multipart registration form.
    pub const REGISTER: &str = "/auth/register";
    /// `POST` the refresh token to invalidate it.
    pub const LOGOUT: &str = "/auth/logout";
    /// `POST` a refresh token, returns a fresh access token.
    pub const REFRESH_TOKEN: &str = "/auth/refresh-token";
    /// `GET` the signed-in user.
    pub const ME: &str = "/auth/me";
    /// `PUT` multipart profile update.
    pub const PROFILE: &str = "/auth/profile";
    /// `PUT` current and new password.
    pub const PASSWORD: &str = "/auth/password";
    /// `POST` an email to receive a reset link.
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
    /// `PUT /auth/reset-password/:token`.
    pub const RESET_PASSWORD: &str = "/auth/reset-password";

    /// Post collection.
    pub const POSTS: &str = "/posts";
    /// Drafts of the signed-in user.
    pub const POST_DRAFTS: &str = "/posts/user/drafts";
    /// Comment collection.
    pub const COMMENTS: &str = "/comments";

    /// Aggregate statistics for the admin dashboard.
    pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
    /// Admin user listing.
    pub const ADMIN_USERS: &str = "/admin/users";
    /// Admin post listing.
    pub const ADMIN_POSTS: &str = "/admin/posts";
    /// Admin comment listing.
    pub const ADMIN_COMMENTS: &str = "/admin/comments";
}
