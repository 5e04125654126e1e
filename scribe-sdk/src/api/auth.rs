use serde::Serialize;

use scribe_common::{AuthResponse, User, constants::endpoints};

use super::form::FormPayload;
use super::resource_path;
use crate::client::ApiRequest;
use crate::client::retry::RefreshTokenBody;
use crate::errors::AuthError;
use crate::forms::{ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm};
use crate::{Result, ScribeHttpClient};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct PasswordBody<'a> {
    password: &'a str,
}

/// Sign in, sign up, sign out and password recovery.
///
/// Returned by [`ScribeHttpClient::auth()`]. Successful sign-ins are written to
/// the client's [`crate::AuthStore`]; failures leave it untouched.
///
/// ```no_run
/// # async fn run(client: scribe::ScribeHttpClient) -> scribe::Result<()> {
/// let user = client.auth().login("ann@example.com", "hunter22").await?;
/// assert!(client.store().is_authenticated().await);
/// println!("Welcome back, {}", user.name);
///
/// client.auth().logout().await?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ScribeHttpClient,
}

impl ScribeHttpClient {
    /// Authentication endpoints.
    pub fn auth(&self) -> AuthApi {
        AuthApi {
            client: self.clone(),
        }
    }
}

impl AuthApi {
    /// `POST /auth/login` and store the returned session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
        .validate()?;

        let request = ApiRequest::post(endpoints::LOGIN).json(&Credentials {
            email: email.trim(),
            password,
        })?;
        let response = self.client.fetch_auth(&request).await?;
        let user = self.establish(response).await?;
        tracing::info!(user = %user.id, "Signed in");
        Ok(user)
    }

    /// Validate `form`, then `POST /auth/register` as multipart.
    ///
    /// When the server answers with a session it is stored, as after a login.
    /// Returns the new user if the server sent one.
    pub async fn register(&self, form: &RegisterForm) -> Result<Option<User>> {
        form.validate()?;

        let payload = FormPayload::new()
            .text("name", form.name.trim())
            .text("email", form.email.trim())
            .text("password", form.password.as_str())
            .file_opt("avatar", form.avatar.clone());
        let request = ApiRequest::post(endpoints::REGISTER).form(payload);
        let response = self.client.fetch_auth(&request).await?;

        if response.token.is_some() && response.user.is_some() {
            let user = self.establish(response).await?;
            tracing::info!(user = %user.id, "Registered and signed in");
            return Ok(Some(user));
        }
        tracing::info!("Registered");
        Ok(response.user)
    }

    /// Sign out.
    ///
    /// Tells the server to drop the refresh token when one is stored. That
    /// call is best effort: its failure is logged and local state is cleared
    /// regardless.
    pub async fn logout(&self) -> Result<()> {
        if let Some(refresh_token) = self.client.store.refresh_token().await {
            let request = ApiRequest::post(endpoints::LOGOUT).json(&RefreshTokenBody {
                refresh_token: &refresh_token,
            })?;
            if let Err(e) = self.client.fetch_ack(&request).await {
                tracing::warn!("Server logout failed, clearing local session anyway: {e}");
            }
        }
        self.client.store.clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Exchange the stored refresh token for a new access token now.
    ///
    /// The store is cleared if the exchange fails.
    pub async fn refresh_session(&self) -> Result<()> {
        let refresh_token = self
            .client
            .store
            .refresh_token()
            .await
            .ok_or(AuthError::MissingRefreshToken)?;
        if let Err(e) = self.client.refresh_access_token(&refresh_token).await {
            self.client.sign_out_locally().await;
            return Err(e);
        }
        Ok(())
    }

    /// `POST /auth/forgot-password`. Returns the server's message.
    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> Result<Option<String>> {
        form.validate()?;
        let request = ApiRequest::post(endpoints::FORGOT_PASSWORD).json(&EmailBody {
            email: form.email.trim(),
        })?;
        self.client.fetch_ack(&request).await
    }

    /// `PUT /auth/reset-password/:token` with the new password.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        form: &ResetPasswordForm,
    ) -> Result<Option<String>> {
        form.validate()?;
        let request = ApiRequest::put(resource_path(endpoints::RESET_PASSWORD, reset_token)?)
            .json(&PasswordBody {
                password: &form.password,
            })?;
        self.client.fetch_ack(&request).await
    }

    /// Store the session carried by a login/register response.
    async fn establish(&self, response: AuthResponse) -> Result<User> {
        let token = response
            .token
            .ok_or_else(|| AuthError::MalformedResponse("missing token".into()))?;
        let user = response
            .user
            .ok_or_else(|| AuthError::MalformedResponse("missing user".into()))?;
        self.client
            .store
            .sign_in(user.clone(), token, response.refresh_token)
            .await?;
        Ok(user)
    }
}
