use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::api::form::FormPayload;
use crate::errors::{RequestError, Result};

/// Request body that can be rebuilt for a replay.
///
/// `reqwest` bodies (multipart in particular) are consumed on send, so the
/// client keeps the ingredients and rebuilds the body per attempt.
#[derive(Debug, Clone, Default)]
pub enum Body {
    #[allow(missing_docs)]
    #[default]
    Empty,
    /// `application/json`.
    Json(Value),
    /// `multipart/form-data`.
    Form(FormPayload),
}

/// One API call: method, endpoint path, query pairs and body.
///
/// ```
/// use scribe::client::ApiRequest;
///
/// let req = ApiRequest::get("/posts").query("search", "rust").query("page", "2");
/// assert_eq!(req.path(), "/posts");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Body,
}

impl ApiRequest {
    #[allow(missing_docs)]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    #[allow(missing_docs)]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[allow(missing_docs)]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[allow(missing_docs)]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[allow(missing_docs)]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one query pair. Order of calls is the order on the wire.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append many query pairs.
    pub fn query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| RequestError::Validation {
            message: format!("unserializable request body: {e}"),
        })?;
        self.body = Body::Json(value);
        Ok(self)
    }

    /// Send `form` as a multipart body.
    pub fn form(mut self, form: FormPayload) -> Self {
        self.body = Body::Form(form);
        self
    }

    #[allow(missing_docs)]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[allow(missing_docs)]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[allow(missing_docs)]
    pub fn query_list(&self) -> &[(String, String)] {
        &self.query
    }

    #[allow(missing_docs)]
    pub fn body(&self) -> &Body {
        &self.body
    }
}
