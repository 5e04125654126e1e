//! Transient user notifications, printed to stderr.

use scribe::Error;

/// Report a completed action.
pub fn success(message: impl AsRef<str>) {
    eprintln!("✔ {}", message.as_ref());
}

/// Report a failed action with the server's reason when there is one,
/// falling back to `fallback`.
pub fn failure(fallback: &str, error: &Error) {
    let reason = error.user_message();
    if reason.trim().is_empty() {
        eprintln!("✘ {fallback}");
    } else {
        eprintln!("✘ {fallback}: {reason}");
    }
    tracing::debug!("{fallback}: {error:?}");
}

/// Marker for failures that were already shown to the user.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Show `result`'s failure, if any, and turn it into a [`Reported`] error.
pub fn outcome<T>(result: scribe::Result<T>, fallback: &str) -> anyhow::Result<T> {
    result.map_err(|e| {
        failure(fallback, &e);
        Reported(fallback.to_string()).into()
    })
}

/// Print the server's acknowledgement, or `fallback` when it sent none.
pub fn acknowledged(message: Option<String>, fallback: &str) {
    match message {
        Some(message) if !message.trim().is_empty() => success(message),
        _ => success(fallback),
    }
}
