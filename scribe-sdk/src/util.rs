use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::{Error, RequestError, Result};

/// Convert non-2xx responses into a structured error that includes the server's reason.
///
/// If the status is successful (2xx), the original response is returned.
/// Otherwise the body is consumed: the envelope's `error` (or `message`) field
/// is preferred, then the raw body text, then the status' canonical reason.
pub(crate) async fn check_http_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(Error::from(RequestError::Server {
        status,
        message: server_message(status, &body),
    }))
}

/// Pick the most useful human-readable reason out of an error body.
pub(crate) fn server_message(status: StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }

    if let Ok(ErrorBody { error, message }) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(reason) = error.or(message).filter(|m| !m.trim().is_empty()) {
            return reason;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Decode a successful response body as JSON, mapping decode failures to
/// [`RequestError::DecodeJson`].
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        RequestError::DecodeJson {
            message: e.to_string(),
        }
        .into()
    })
}
