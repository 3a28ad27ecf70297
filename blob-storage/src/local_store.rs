use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;
use crate::store::{is_image_media_type, media_type_for, reference_for, BlobError, BlobResult, ImageBlob, ImageStore, StoredImage};

const DEFAULT_FILENAME: &str = "upload";

/// An `ImageStore` that keeps every image as a file in one local directory.
#[derive(Clone, Debug)]
pub struct LocalImageStore {
    directory: PathBuf,
}

impl LocalImageStore {
    /// Creates a store rooted at `directory`, creating the directory if needed.
    pub fn new(directory: impl Into<PathBuf>) -> BlobResult<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Keeps only the final path component of a client supplied filename.
fn sanitize_filename(original: &str) -> String {
    let name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let name: String = name.chars().filter(|c| *c != '\0').collect();
    if name.is_empty() || name.chars().all(|c| c == '.') {
        DEFAULT_FILENAME.to_string()
    } else {
        name
    }
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, bytes: &[u8], declared_media_type: &str, original_filename: &str) -> BlobResult<StoredImage> {
        if !is_image_media_type(declared_media_type) {
            return Err(BlobError::Validation(format!(
                "File must be an image, got content type '{}'",
                declared_media_type
            )));
        }

        let storage_filename = format!("{}_{}", Uuid::new_v4().simple(), sanitize_filename(original_filename));
        fs::write(self.directory.join(&storage_filename), bytes).await?;
        tracing::info!("Stored image {} ({} bytes)", storage_filename, bytes.len());

        Ok(StoredImage {
            reference: reference_for(&storage_filename),
            storage_filename,
        })
    }

    async fn retrieve(&self, storage_filename: &str) -> BlobResult<ImageBlob> {
        if !is_plain_filename(storage_filename) {
            return Err(BlobError::NotFound(storage_filename.to_string()));
        }

        match fs::read(self.directory.join(storage_filename)).await {
            Ok(bytes) => Ok(ImageBlob {
                bytes,
                media_type: media_type_for(storage_filename),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BlobError::NotFound(storage_filename.to_string())),
            Err(e) => Err(BlobError::Io(e)),
        }
    }
}
