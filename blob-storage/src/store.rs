use std::path::Path;
use async_trait::async_trait;
use thiserror::Error;

/// Every image reference handed out by an [`ImageStore`] starts with this.
pub const IMAGE_REFERENCE_PREFIX: &str = "/images/";

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

pub type BlobResult<T> = Result<T, BlobError>;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("{0}")]
    Validation(String),

    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Failed to access image storage")]
    Io(#[from] std::io::Error),
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub storage_filename: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

/// Trait for storing and fetching images by their storage filename.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores an image blob, rejecting anything not declared as an image.
    async fn store(&self, bytes: &[u8], declared_media_type: &str, original_filename: &str) -> BlobResult<StoredImage>;

    /// Retrieves an image and the media type implied by its extension.
    async fn retrieve(&self, storage_filename: &str) -> BlobResult<ImageBlob>;
}

pub fn reference_for(storage_filename: &str) -> String {
    format!("{}{}", IMAGE_REFERENCE_PREFIX, storage_filename)
}

/// Guess a media type from a filename extension.
pub fn media_type_for(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => FALLBACK_MEDIA_TYPE,
    }
}

/// True when the declared media type's top-level type is `image`.
pub(crate) fn is_image_media_type(declared: &str) -> bool {
    declared
        .split(';')
        .next()
        .and_then(|essence| essence.trim().split_once('/'))
        .map(|(top, sub)| top.eq_ignore_ascii_case("image") && !sub.is_empty())
        .unwrap_or(false)
}
