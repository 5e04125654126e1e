//! Bearer injection and the single refresh-and-retry on `401`.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;

use scribe_common::{AuthResponse, constants::endpoints};

use super::core::ScribeHttpClient;
use super::request::{ApiRequest, Body};
use crate::errors::{AuthError, Result};
use crate::util::check_http_status;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshTokenBody<'a> {
    pub(crate) refresh_token: &'a str,
}

impl ScribeHttpClient {
    /// Send `request` through the auth layer and return the 2xx response.
    ///
    /// - Attaches the store's current access token as a bearer.
    /// - On `401`, refreshes the access token once and replays the request.
    ///   A `401` on the replay is returned as is.
    /// - Without a refresh token, or when the refresh fails, the store is
    ///   cleared before the error is returned.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn run(client: scribe::ScribeHttpClient) -> scribe::Result<()> {
    /// use scribe::client::ApiRequest;
    ///
    /// let resp = client.request(&ApiRequest::get("/posts").query("tag", "rust")).await?;
    /// println!("{}", resp.text().await?);
    /// # Ok(()) }
    /// ```
    pub async fn request(&self, request: &ApiRequest) -> Result<Response> {
        let response = self.send_once(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return check_http_status(response).await;
        }

        let Some(refresh_token) = self.store.refresh_token().await else {
            tracing::warn!(path = %request.path, "Unauthorized and no refresh token; signing out");
            self.sign_out_locally().await;
            return check_http_status(response).await;
        };

        tracing::debug!(path = %request.path, "Unauthorized; refreshing access token");
        if let Err(e) = self.refresh_access_token(&refresh_token).await {
            tracing::warn!("Token refresh failed, signing out: {e}");
            self.sign_out_locally().await;
            return Err(e);
        }

        let replay = self.send_once(request).await?;
        check_http_status(replay).await
    }

    /// One attempt: build the request from scratch with the token current now.
    pub(crate) async fn send_once(&self, request: &ApiRequest) -> Result<Response> {
        let builder = self.prepare(request).await?;
        tracing::debug!(method = %request.method, path = %request.path, "Sending request");
        Ok(builder.send().await?)
    }

    async fn prepare(&self, request: &ApiRequest) -> Result<RequestBuilder> {
        let mut url = self.endpoint(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(token) = self.store.token().await {
            builder = builder.bearer_auth(token);
        }

        Ok(match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Form(form) => builder.multipart(form.to_multipart()?),
        })
    }

    /// Exchange `refresh_token` for a new access token and store it.
    ///
    /// Goes straight to the HTTP client: the refresh call itself is never
    /// retried and carries no bearer.
    pub(crate) async fn refresh_access_token(&self, refresh_token: &str) -> Result<()> {
        let url = self.endpoint(endpoints::REFRESH_TOKEN)?;
        let response = self
            .http
            .post(url)
            .json(&RefreshTokenBody { refresh_token })
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(
                AuthError::RefreshFailed(crate::util::server_message(status, &body)).into(),
            );
        }

        let parsed: AuthResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::RefreshFailed(format!("unreadable response: {e}")))?;
        if !parsed.success {
            return Err(AuthError::RefreshFailed(parsed.reason()).into());
        }
        let token = parsed
            .token
            .ok_or_else(|| AuthError::RefreshFailed("response carried no token".into()))?;

        self.store.set_token(token).await?;
        if let Some(rotated) = parsed.refresh_token {
            self.store.set_refresh_token(rotated).await?;
        }
        tracing::debug!("Access token refreshed");
        Ok(())
    }

    /// Clear the store without calling the server. Storage failures are logged.
    pub(crate) async fn sign_out_locally(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::error!("Failed to clear auth state: {e}");
        }
    }
}
