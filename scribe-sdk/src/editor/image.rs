use base64::{Engine, engine::general_purpose::STANDARD};

use crate::api::form::Upload;

/// Image MIME types accepted by the editor.
pub const ALLOWED_IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/ico",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Largest image the editor embeds: 5 MiB.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Why an image was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[allow(missing_docs)]
    #[error("Please select a valid image file (JPEG, PNG, GIF, WEBP, SVG)")]
    UnsupportedType(String),
    #[allow(missing_docs)]
    #[error("Image file is too large. Maximum size is 5MB")]
    TooLarge(usize),
}

/// An image picked for embedding into a post body.
///
/// Embedding is local: the file becomes a `data:` URL inside the markdown,
/// no upload happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile(Upload);

impl ImageFile {
    /// Accept `upload` if its type and size are allowed.
    ///
    /// `image/x-icon` (what extension guessing yields for `.ico`) counts as `image/ico`.
    pub fn new(upload: Upload) -> Result<Self, ImageError> {
        let mime = match upload.mime.as_str() {
            "image/x-icon" | "image/vnd.microsoft.icon" => "image/ico",
            other => other,
        };
        if !ALLOWED_IMAGE_TYPES.contains(&mime) {
            return Err(ImageError::UnsupportedType(upload.mime));
        }
        if upload.bytes.len() > MAX_IMAGE_SIZE {
            return Err(ImageError::TooLarge(upload.bytes.len()));
        }
        Ok(Self(upload))
    }

    /// File name, used as alt text.
    pub fn name(&self) -> &str {
        &self.0.file_name
    }

    /// `data:<mime>;base64,<payload>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.0.mime, STANDARD.encode(&self.0.bytes))
    }
}

/// Markdown embedding `file` inline: `![name](data:...)`.
///
/// Brackets and backslashes in the name are escaped so the alt text stays closed.
pub fn image_markdown(file: &ImageFile) -> String {
    let mut alt = String::with_capacity(file.name().len());
    for c in file.name().chars() {
        if matches!(c, '[' | ']' | '\\') {
            alt.push('\\');
        }
        alt.push(c);
    }
    format!("![{alt}]({})", file.data_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_as_data_url() {
        let file = ImageFile::new(Upload::from_bytes("dot.png", vec![0x89, b'P', b'N', b'G'])).unwrap();
        assert_eq!(image_markdown(&file), "![dot.png](data:image/png;base64,iVBORw==)");
    }

    #[test]
    fn brackets_in_name_are_escaped() {
        let file = ImageFile::new(Upload::from_bytes("a]b[1].png", vec![1, 2, 3])).unwrap();
        assert_eq!(
            image_markdown(&file),
            r"![a\]b\[1\].png](data:image/png;base64,AQID)"
        );

        let html = crate::editor::render_preview(&image_markdown(&file));
        assert!(html.contains(r#"src="data:image/png;base64,AQID""#));
    }

    #[test]
    fn rejects_other_types() {
        let err = ImageFile::new(Upload::from_bytes("notes.txt", b"hi".to_vec())).unwrap_err();
        assert_eq!(err, ImageError::UnsupportedType("text/plain".into()));
        assert!(ImageFile::new(Upload::from_bytes("favicon.ico", vec![0])).is_ok());
    }

    #[test]
    fn size_cap_is_inclusive() {
        let at_cap = Upload::new("big.gif", "image/gif", vec![0; MAX_IMAGE_SIZE]);
        assert!(ImageFile::new(at_cap).is_ok());

        let over = Upload::new("big.gif", "image/gif", vec![0; MAX_IMAGE_SIZE + 1]);
        assert_eq!(
            ImageFile::new(over).unwrap_err(),
            ImageError::TooLarge(MAX_IMAGE_SIZE + 1)
        );
    }
}
