use serde::Serialize;

use scribe_common::{User, constants::endpoints};

use super::form::{FormPayload, Upload};
use crate::client::ApiRequest;
use crate::errors::AuthError;
use crate::forms::PasswordChangeForm;
use crate::{Result, ScribeHttpClient};

/// Partial update for `PUT /auth/profile`. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[allow(missing_docs)]
    pub name: Option<String>,
    #[allow(missing_docs)]
    pub email: Option<String>,
    #[allow(missing_docs)]
    pub bio: Option<String>,
    #[allow(missing_docs)]
    pub avatar: Option<Upload>,
}

impl ProfileUpdate {
    pub(crate) fn to_form(&self) -> FormPayload {
        FormPayload::new()
            .text_opt("name", self.name.as_deref())
            .text_opt("email", self.email.as_deref())
            .text_opt("bio", self.bio.as_deref())
            .file_opt("avatar", self.avatar.clone())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChangeBody<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// The signed-in user's own profile.
///
/// Returned by [`ScribeHttpClient::users()`]. Every call needs an access token
/// in the store.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ScribeHttpClient,
}

impl ScribeHttpClient {
    /// Profile endpoints.
    pub fn users(&self) -> UsersApi {
        UsersApi {
            client: self.clone(),
        }
    }
}

impl UsersApi {
    async fn require_session(&self) -> Result<()> {
        if self.client.store.token().await.is_none() {
            return Err(AuthError::NotSignedIn.into());
        }
        Ok(())
    }

    /// `GET /auth/me`. The result refreshes the cached user.
    pub async fn get_profile(&self) -> Result<User> {
        self.require_session().await?;
        let response = self.client.fetch_auth(&ApiRequest::get(endpoints::ME)).await?;
        let user = response
            .user
            .ok_or_else(|| AuthError::MalformedResponse("missing user".into()))?;
        self.client.store.confirm_user(user.clone()).await?;
        Ok(user)
    }

    /// `PUT /auth/profile` as multipart. The result replaces the cached user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.require_session().await?;
        let request = ApiRequest::put(endpoints::PROFILE).form(update.to_form());
        let response = self.client.fetch_auth(&request).await?;
        let user = response
            .user
            .ok_or_else(|| AuthError::MalformedResponse("missing user".into()))?;
        self.client.store.set_user(user.clone()).await?;
        tracing::info!(user = %user.id, "Updated profile");
        Ok(user)
    }

    /// Validate `form`, then `PUT /auth/password`.
    pub async fn update_password(&self, form: &PasswordChangeForm) -> Result<Option<String>> {
        form.validate()?;
        self.require_session().await?;
        let request = ApiRequest::put(endpoints::PASSWORD).json(&PasswordChangeBody {
            current_password: &form.current_password,
            new_password: &form.new_password,
        })?;
        self.client.fetch_ack(&request).await
    }
}
