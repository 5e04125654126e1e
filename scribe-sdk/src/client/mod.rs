//! HTTP transport: base URL, bearer injection, refresh-and-retry.

pub(crate) mod core;
mod fetch;
pub(crate) mod request;
pub(crate) mod retry;

pub use self::core::{ScribeHttpClient, ScribeHttpClientBuilder};
pub use self::request::{ApiRequest, Body};
