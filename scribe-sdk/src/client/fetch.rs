//! Typed decoding of the response envelope.

use serde::de::DeserializeOwned;
use serde_json::Value;

use scribe_common::{AuthResponse, Envelope, Page};

use super::core::ScribeHttpClient;
use super::request::ApiRequest;
use crate::errors::Result;
use crate::util::decode_json;

impl ScribeHttpClient {
    /// Send `request` and return the envelope's `data` payload.
    pub async fn fetch_data<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let response = self.request(request).await?;
        let envelope: Envelope<T> = decode_json(response).await?;
        Ok(envelope.into_data()?)
    }

    /// Send `request` and return one page of a listing.
    pub async fn fetch_page<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Page<T>> {
        let response = self.request(request).await?;
        let envelope: Envelope<Vec<T>> = decode_json(response).await?;
        Ok(envelope.into_page()?)
    }

    /// Send `request` and only check that it succeeded.
    ///
    /// Returns the envelope's `message`, if any. An empty body counts as success.
    pub async fn fetch_ack(&self, request: &ApiRequest) -> Result<Option<String>> {
        let response = self.request(request).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let envelope: Envelope<Value> =
            serde_json::from_slice(&bytes).map_err(|e| crate::errors::RequestError::DecodeJson {
                message: e.to_string(),
            })?;
        let message = envelope.message.clone();
        envelope.into_result()?;
        Ok(message)
    }

    /// Send `request` to an auth endpoint, whose tokens sit at the top level.
    pub(crate) async fn fetch_auth(&self, request: &ApiRequest) -> Result<AuthResponse> {
        let response = self.request(request).await?;
        let auth: AuthResponse = decode_json(response).await?;
        if !auth.success {
            return Err(crate::errors::RequestError::Api {
                message: auth.reason(),
            }
            .into());
        }
        Ok(auth)
    }
}
