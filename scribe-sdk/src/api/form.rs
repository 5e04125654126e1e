//! Multipart payloads and file uploads.

use std::{fmt, path::Path};

use reqwest::multipart::{Form, Part};

use crate::errors::{RequestError, Result};

/// A file attached to a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    /// Name sent as the part's `filename`.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub mime: String,
    #[allow(missing_docs)]
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Upload {
    #[allow(missing_docs)]
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// In-memory file whose MIME type is guessed from `file_name`.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Read a file from disk. The MIME type is guessed from the extension.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| RequestError::Validation {
                message: format!("cannot read {}: {e}", path.display()),
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::from_bytes(file_name, bytes))
    }

    fn to_part(&self) -> std::result::Result<Part, reqwest::Error> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)
    }
}

/// One multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    #[allow(missing_docs)]
    Text(String),
    #[allow(missing_docs)]
    File(Upload),
}

/// Ordered multipart fields. Names may repeat (`images`).
///
/// Kept as plain data so the client can rebuild the multipart body when a
/// request is replayed after a token refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct FormPayload {
    fields: Vec<(String, FormValue)>,
}

impl FormPayload {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields
            .push((name.to_string(), FormValue::Text(value.into())));
        self
    }

    /// Append a text field only for a present, non-empty value.
    pub fn text_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.text(name, v),
            _ => self,
        }
    }

    /// Append a file field.
    pub fn file(mut self, name: &str, upload: Upload) -> Self {
        self.fields.push((name.to_string(), FormValue::File(upload)));
        self
    }

    /// Append a file field when present.
    pub fn file_opt(self, name: &str, upload: Option<Upload>) -> Self {
        match upload {
            Some(u) => self.file(name, u),
            None => self,
        }
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    /// First text value stored under `name`.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::Text(t) if n == name => Some(t.as_str()),
            _ => None,
        })
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a fresh `multipart/form-data` body.
    pub fn to_multipart(&self) -> std::result::Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in &self.fields {
            form = match value {
                FormValue::Text(text) => form.text(name.clone(), text.clone()),
                FormValue::File(upload) => form.part(name.clone(), upload.to_part()?),
            };
        }
        Ok(form)
    }
}

/// Tags travel in multipart forms as a JSON-stringified array.
///
/// ```
/// use scribe::api::{decode_tags, encode_tags};
///
/// let tags = vec!["rust".to_string(), "web".to_string()];
/// assert_eq!(encode_tags(&tags), r#"["rust","web"]"#);
/// assert_eq!(decode_tags(&encode_tags(&tags)).unwrap(), tags);
/// ```
pub fn encode_tags(tags: &[String]) -> String {
    serde_json::Value::from(tags.to_vec()).to_string()
}

/// Parse a JSON-stringified tag array.
pub fn decode_tags(raw: &str) -> std::result::Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(raw)
}
