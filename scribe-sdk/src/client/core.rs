use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use url::Url;

use scribe_common::constants::DEFAULT_API_URL;

use crate::{AuthStore, errors::BuildError};

const DEFAULT_USER_AGENT: &str = concat!("scribe", "@", env!("CARGO_PKG_VERSION"),);

/// Configures a [`ScribeHttpClient`] before construction.
///
/// Customize the API base URL, timeouts, user-agent and the [`AuthStore`] the
/// client reads tokens from. Most code obtains this via
/// [`ScribeHttpClient::builder()`].
///
/// # Defaults
/// - Base URL: `http://localhost:5000/api`
/// - HTTP request timeout: reqwest default (no global timeout) unless set via
///   [`Self::request_timeout`]
/// - User-agent: `scribe@<crate-version>` plus any [`Self::user_agent_extra`]
/// - Auth store: [`AuthStore::in_memory()`]
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// # use scribe::{AuthStore, ScribeHttpClient};
/// let client = ScribeHttpClient::builder()
///     .base_url("https://blog.example.com/api")
///     .request_timeout(Duration::from_secs(10))
///     .user_agent_extra("myapp/1.2.3")
///     .store(AuthStore::in_memory())
///     .build()?;
/// # Ok::<_, scribe::BuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ScribeHttpClientBuilder {
    base_url: Option<String>,
    http_request_timeout: Option<Duration>,

    /// Optional user-agent segment appended to the default UA for app-level telemetry.
    user_agent_extra: Option<String>,

    store: Option<AuthStore>,
}

impl ScribeHttpClientBuilder {
    /// Set the API base URL, e.g. `https://blog.example.com/api`.
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set HTTP requests timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.http_request_timeout = Some(timeout);
        self
    }

    /// Append an extra user-agent segment after the default `scribe@<version>`.
    /// Example: `.user_agent_extra("myapp/1.2.3")`
    pub fn user_agent_extra<S: Into<String>>(mut self, extra: S) -> Self {
        self.user_agent_extra = Some(extra.into());
        self
    }

    /// Share an existing [`AuthStore`] with the client.
    pub fn store(mut self, store: AuthStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Build [`ScribeHttpClient`]
    pub fn build(self) -> Result<ScribeHttpClient, BuildError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_API_URL);
        let base_url = Url::parse(raw.trim_end_matches('/'))?;

        // Compose user agent with optional extra part.
        let user_agent = match &self.user_agent_extra {
            Some(extra) if !extra.trim().is_empty() => {
                format!("{DEFAULT_USER_AGENT} {}", extra.trim())
            }
            _ => DEFAULT_USER_AGENT.to_string(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut http_builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers);
        if let Some(timeout) = self.http_request_timeout {
            http_builder = http_builder.timeout(timeout);
        }

        Ok(ScribeHttpClient {
            http: http_builder.build()?,
            base_url,
            store: self.store.unwrap_or_else(AuthStore::in_memory),
        })
    }
}

/// Transport client for the Scribe REST API.
///
/// `ScribeHttpClient` is the engine the resource handles
/// ([`crate::api::AuthApi`], [`crate::api::PostsApi`], ...) are built on. It owns:
/// - a reqwest HTTP client with a fixed base URL and JSON `Accept` header,
/// - a shared [`AuthStore`] that supplies the bearer token.
///
/// ### What it does
/// - Attaches `Authorization: Bearer <token>` whenever the store holds a token,
///   read at call time.
/// - On a `401`, exchanges the stored refresh token for a new access token and
///   replays the request exactly once. No refresh token, or a failed refresh,
///   signs the store out and rejects.
/// - Turns non-2xx responses into [`crate::errors::RequestError::Server`].
///
/// Cheap to clone; clones share the connection pool and the store.
///
/// ### Examples
/// ```no_run
/// # use scribe::{ScribeHttpClient, Result};
/// # async fn run() -> Result<()> {
/// let client = ScribeHttpClient::new("http://localhost:5000/api")?;
/// let post = client.posts().get("65f0c0ffee").await?;
/// println!("{}", post.title);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct ScribeHttpClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) store: AuthStore,
}

impl ScribeHttpClient {
    /// Client for `base_url` with an in-memory auth store.
    pub fn new(base_url: &str) -> Result<ScribeHttpClient, BuildError> {
        Self::builder().base_url(base_url).build()
    }

    /// Returns a builder to edit settings before creating [`ScribeHttpClient`].
    pub fn builder() -> ScribeHttpClientBuilder {
        ScribeHttpClientBuilder::default()
    }

    // === Getters ===

    /// API base URL, without trailing slash.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The auth store this client reads tokens from.
    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    /// Resolve an endpoint path (`/posts/1`) against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_under_base_path() {
        let client = ScribeHttpClient::new("https://blog.example.com/api/").unwrap();
        assert_eq!(
            client.endpoint("/posts/1/like").unwrap().as_str(),
            "https://blog.example.com/api/posts/1/like"
        );
        assert_eq!(client.base_url().as_str(), "https://blog.example.com/api");
    }

    #[test]
    fn default_base_url() {
        let client = ScribeHttpClient::builder().build().unwrap();
        assert_eq!(
            client.endpoint("/auth/me").unwrap().as_str(),
            "http://localhost:5000/api/auth/me"
        );
    }

    #[test]
    fn invalid_base_url_is_a_build_error() {
        let err = ScribeHttpClient::new("not a url").unwrap_err();
        assert!(matches!(err, BuildError::BaseUrl(_)));
    }
}
