//! The uniform `{success, data, count?, pagination?, error?}` response wrapper.

use serde::{Deserialize, Serialize};

/// Page metadata attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page index.
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    #[allow(missing_docs)]
    pub limit: u32,
    #[serde(default)]
    #[allow(missing_docs)]
    pub total_pages: u32,
    #[serde(default)]
    #[allow(missing_docs)]
    pub total_results: u64,
}

impl Pagination {
    /// True if another page follows this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// True if this is not the first page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Response body shape shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Missing on some endpoints; the HTTP status already said "ok" then.
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default = "Option::default")]
    #[allow(missing_docs)]
    pub data: Option<T>,
    /// Number of items in `data` for list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub pagination: Option<Pagination>,
    /// Human readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message (e.g. "Password reset email sent").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Why an [`Envelope`] could not be turned into its payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// `success` was `false`.
    #[error("{0}")]
    Rejected(String),
    /// `success` was `true` but no `data` was sent.
    #[error("response carried no data")]
    MissingData,
}

impl<T> Envelope<T> {
    /// Best available failure reason.
    pub fn reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "request was not successful".to_string())
    }

    /// Check `success` and return the data payload.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(self.reason()));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }

    /// Check `success` only; the payload may be absent.
    pub fn into_result(self) -> Result<Option<T>, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(self.reason()));
        }
        Ok(self.data)
    }
}

impl<T> Envelope<Vec<T>> {
    /// Check `success` and return the items with their paging metadata.
    ///
    /// A list response with no `data` is an empty page.
    pub fn into_page(self) -> Result<Page<T>, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(self.reason()));
        }
        let items = self.data.unwrap_or_default();
        Ok(Page {
            count: self.count.unwrap_or(items.len() as u64),
            pagination: self.pagination,
            items,
        })
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[allow(missing_docs)]
    pub items: Vec<T>,
    /// Item count reported by the server.
    pub count: u64,
    #[allow(missing_docs)]
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    /// True if the server reports another page after this one.
    pub fn has_next(&self) -> bool {
        self.pagination.is_some_and(|p| p.has_next())
    }
}
