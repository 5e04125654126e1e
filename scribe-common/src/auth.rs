//! Auth endpoint responses and the persisted auth snapshot.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Body returned by `/auth/login`, `/auth/register`, `/auth/refresh-token`,
/// `/auth/me` and `/auth/profile`.
///
/// Unlike resource endpoints the tokens and user sit at the top level. Some
/// server versions wrap the user in `data`, which is accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default = "default_success")]
    #[allow(missing_docs)]
    pub success: bool,
    /// Short-lived access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Long-lived token exchanged for new access tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, alias = "data", skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

impl AuthResponse {
    /// Best available failure reason.
    pub fn reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "authentication was not successful".to_string())
    }
}

/// The subset of auth state that survives restarts.
///
/// Serialized verbatim to the configured storage under
/// [`crate::constants::AUTH_STORAGE_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    #[serde(default)]
    #[allow(missing_docs)]
    pub user: Option<User>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub token: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub is_authenticated: bool,
}
