//! Unified error types for the `scribe` crate.
//!
//! This module centralizes all failures that can occur while using the SDK and
//! provides a single top-level [`Error`] enum plus the convenient [`Result`] alias.
//! Errors from lower layers (`reqwest`, `serde_json`, URL parsing, storage I/O) are
//! mapped into structured variants so callers can handle them precisely.

use reqwest::StatusCode;
use thiserror::Error;

use crate::forms::FieldErrors;
use scribe_common::envelope::EnvelopeError;

// --- Build-Time Error ---

/// Errors that can occur while building a [`crate::ScribeHttpClient`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL is not a valid absolute URL.
    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

// --- The Main Operational Error Enum ---

/// The crate’s top-level error type.
///
/// - [`Error::Request`]: HTTP transport/server/decoding issues
/// - [`Error::Parse`]: URL parsing failures
/// - [`Error::Authentication`]: session/refresh issues
/// - [`Error::Validation`]: a form failed client-side checks; nothing was sent
/// - [`Error::Storage`]: persisting or loading the auth snapshot failed
/// - [`Error::Build`]: construction of the client failed
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request/response failed (transport, server, JSON).
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// URL parsing failed while preparing a request.
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),

    /// Authentication flow failed (missing session, refresh rejected).
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// Client-side form validation blocked the request.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Auth snapshot storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Building the client failed.
    #[error("Client build failed: {0}")]
    Build(#[from] BuildError),
}

impl Error {
    /// HTTP status of a server-side failure, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Request(RequestError::Server { status, .. }) => Some(*status),
            Error::Request(RequestError::Transport(e)) => e.status(),
            _ => None,
        }
    }

    /// True for a `401 Unauthorized` from the server.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Short message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Error::Request(RequestError::Server { message, .. })
            | Error::Request(RequestError::Api { message }) => message.clone(),
            Error::Validation(fields) => fields.to_string(),
            other => other.to_string(),
        }
    }
}

// --- Consolidated Authentication Error ---

/// Errors originating from session handling and the token refresh flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An operation needed a signed-in user but the store is empty.
    #[error("Not signed in")]
    NotSignedIn,

    /// The server answered `401` and no refresh token was available.
    #[error("Session expired and no refresh token is stored")]
    MissingRefreshToken,

    /// Exchanging the refresh token for a new access token failed.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// An auth endpoint answered without the expected tokens or user.
    #[error("Malformed auth response: {0}")]
    MalformedResponse(String),
}

// --- Consolidated Request Error ---

/// Transport and server-side HTTP errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network/protocol failure from reqwest (timeouts, TLS, I/O, etc.).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-success status. Includes status and body message.
    #[error("Server responded with an error: {status} - {message}")]
    Server {
        /// The HTTP status code returned by the server.
        status: StatusCode,
        /// Envelope `error`/`message`, the raw body, or the canonical reason.
        message: String,
    },

    /// The server answered 2xx but the envelope said `success: false` or lacked data.
    #[error("API rejected the request: {message}")]
    Api {
        /// Reason taken from the envelope.
        message: String,
    },

    /// Caller supplied an invalid URL/path/argument for this API.
    #[error("Invalid request: {message}")]
    Validation {
        /// Human-readable explanation of what was invalid.
        message: String,
    },

    /// JSON decoding failed when parsing a server response.
    #[error("JSON decode error: {message}")]
    DecodeJson {
        /// Error message from the JSON deserializer.
        message: String,
    },
}

// --- Storage Error ---

/// Failures while reading or writing the persisted auth snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored snapshot is not valid JSON.
    #[error("Corrupt auth snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// No data directory could be determined for the default location.
    #[error("Could not determine a data directory for the auth snapshot")]
    NoDataDir,
}

/// A specialized `Result` type for `scribe` operations.
pub type Result<T> = std::result::Result<T, Error>;

// Ergonomic "Staircase" From Implementations ---
macro_rules! impl_from_for_error {
    ($from_type:ty, $to_variant:path) => {
        impl From<$from_type> for Error {
            fn from(err: $from_type) -> Self {
                $to_variant(err.into())
            }
        }
    };
}

impl_from_for_error!(reqwest::Error, Error::Request);
impl_from_for_error!(std::io::Error, Error::Storage);

impl From<EnvelopeError> for Error {
    fn from(err: EnvelopeError) -> Self {
        RequestError::Api {
            message: err.to_string(),
        }
        .into()
    }
}

impl From<FieldErrors> for Error {
    fn from(err: FieldErrors) -> Self {
        Error::Validation(err)
    }
}
